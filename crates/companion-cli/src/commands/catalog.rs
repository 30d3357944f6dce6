use colored::Colorize;
use companion_core::catalog::{Course, CourseQuery, CourseRepository};
use companion_infrastructure::StaticCourseRepository;

pub fn run(query: Option<&str>, category: &str, purchased: bool) {
    let catalog = StaticCourseRepository::new();
    let source = if purchased {
        catalog.get_purchased()
    } else {
        catalog.get_all()
    };
    let courses = CourseQuery::new(query.unwrap_or_default(), category).apply(&source);

    if courses.is_empty() {
        println!("{}", "No courses found".bright_black());
        return;
    }
    for course in &courses {
        print_course(course);
    }
    println!("{}", format!("{} course(s)", courses.len()).bright_black());
}

pub fn print_course(course: &Course) {
    let owned = if course.is_purchased {
        "owned".green()
    } else {
        "not owned".bright_black()
    };
    println!(
        "{} {} [{}]",
        course.id.bright_cyan(),
        course.title.bold(),
        owned
    );
    println!(
        "    {} | {} | {}",
        course.category, course.difficulty, course.duration
    );
}
