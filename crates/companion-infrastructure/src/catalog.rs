//! Built-in course catalog.

use companion_core::catalog::{Course, CourseCategory, CourseRepository, Difficulty};
use once_cell::sync::Lazy;

struct CourseRow {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: Difficulty,
    duration: &'static str,
    tags: &'static [&'static str],
    is_purchased: bool,
}

const COURSE_ROWS: &[CourseRow] = &[
    CourseRow {
        id: "cpp-fundamentals-101",
        title: "C++ Fundamentals",
        description: "Complete C++ programming course from basics to advanced concepts",
        category: "Programming",
        difficulty: Difficulty::Beginner,
        duration: "6 hours",
        tags: &["programming", "cpp", "beginner", "oop"],
        is_purchased: true,
    },
    CourseRow {
        id: "python-data-science-201",
        title: "Python for Data Science",
        description: "Master Python libraries for data analysis: NumPy, Pandas, Matplotlib",
        category: "Data Science",
        difficulty: Difficulty::Intermediate,
        duration: "10 hours",
        tags: &["python", "data science", "pandas", "numpy"],
        is_purchased: true,
    },
    CourseRow {
        id: "ml-fundamentals-401",
        title: "Machine Learning Fundamentals",
        description: "Learn supervised and unsupervised learning, neural networks, and deep learning",
        category: "Artificial Intelligence",
        difficulty: Difficulty::Advanced,
        duration: "14 hours",
        tags: &["machine learning", "ai", "neural networks", "deep learning"],
        is_purchased: false,
    },
    CourseRow {
        id: "web-dev-fullstack-301",
        title: "Full Stack Web Development",
        description: "Build modern web applications with React, Node.js, Express, and MongoDB",
        category: "Web Development",
        difficulty: Difficulty::Advanced,
        duration: "16 hours",
        tags: &["react", "nodejs", "mongodb", "full stack"],
        is_purchased: true,
    },
    CourseRow {
        id: "dsa-interview-prep-501",
        title: "Data Structures & Algorithms",
        description: "Master DSA for coding interviews at top tech companies",
        category: "Computer Science",
        difficulty: Difficulty::Intermediate,
        duration: "12 hours",
        tags: &["dsa", "algorithms", "interview", "leetcode"],
        is_purchased: false,
    },
    CourseRow {
        id: "ui-ux-design-101",
        title: "UI/UX Design Principles",
        description: "Create beautiful and intuitive user interfaces with Figma",
        category: "Design",
        difficulty: Difficulty::Beginner,
        duration: "8 hours",
        tags: &["design", "figma", "ui", "ux"],
        is_purchased: true,
    },
    CourseRow {
        id: "mobile-dev-flutter-601",
        title: "Mobile App Development with Flutter",
        description: "Build cross-platform mobile apps for iOS and Android",
        category: "Mobile Development",
        difficulty: Difficulty::Intermediate,
        duration: "11 hours",
        tags: &["flutter", "dart", "mobile", "app development"],
        is_purchased: false,
    },
    CourseRow {
        id: "cloud-aws-basics-701",
        title: "AWS Cloud Computing Essentials",
        description: "Learn cloud computing fundamentals with Amazon Web Services",
        category: "Cloud Computing",
        difficulty: Difficulty::Beginner,
        duration: "9 hours",
        tags: &["aws", "cloud", "devops", "infrastructure"],
        is_purchased: true,
    },
    CourseRow {
        id: "nlp-transformers-801",
        title: "NLP with Transformers",
        description: "Build state-of-the-art NLP models with transformers and BERT",
        category: "Artificial Intelligence",
        difficulty: Difficulty::Advanced,
        duration: "13 hours",
        tags: &["nlp", "transformers", "bert", "ai"],
        is_purchased: false,
    },
    CourseRow {
        id: "cybersecurity-basics-901",
        title: "Cybersecurity Fundamentals",
        description: "Learn essential cybersecurity concepts and defense strategies",
        category: "Cybersecurity",
        difficulty: Difficulty::Beginner,
        duration: "7 hours",
        tags: &["security", "cybersecurity", "hacking", "network"],
        is_purchased: true,
    },
];

const CATEGORY_ROWS: &[(&str, &str)] = &[
    ("all", "All"),
    ("programming", "Programming"),
    ("data-science", "Data Science"),
    ("web-development", "Web Dev"),
    ("ai", "AI/ML"),
    ("design", "Design"),
    ("mobile", "Mobile"),
    ("cloud", "Cloud"),
    ("security", "Security"),
];

static COURSES: Lazy<Vec<Course>> = Lazy::new(|| {
    COURSE_ROWS
        .iter()
        .map(|row| Course {
            id: row.id.to_string(),
            title: row.title.to_string(),
            description: row.description.to_string(),
            category: row.category.to_string(),
            difficulty: row.difficulty,
            duration: row.duration.to_string(),
            tags: row.tags.iter().map(|t| t.to_string()).collect(),
            is_purchased: row.is_purchased,
        })
        .collect()
});

static CATEGORIES: Lazy<Vec<CourseCategory>> = Lazy::new(|| {
    CATEGORY_ROWS
        .iter()
        .map(|(id, name)| CourseCategory::new(*id, *name))
        .collect()
});

/// The catalog bundled with the widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCourseRepository;

impl StaticCourseRepository {
    pub fn new() -> Self {
        Self
    }

    /// Borrowed view of the catalog.
    pub fn courses(&self) -> &'static [Course] {
        COURSES.as_slice()
    }
}

impl CourseRepository for StaticCourseRepository {
    fn get_all(&self) -> Vec<Course> {
        COURSES.clone()
    }

    fn categories(&self) -> Vec<CourseCategory> {
        CATEGORIES.clone()
    }

    fn find_by_id(&self, id: &str) -> Option<Course> {
        COURSES.iter().find(|course| course.id == id).cloned()
    }
}
