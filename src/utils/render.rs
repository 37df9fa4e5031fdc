use comfy_table::{Cell, Table};
use crate::models::{CourseRecord, Grade};
use crate::utils::gpa::summarize;

// Table for the terminal, followed by the output text (if any) and the credit totals.
pub fn render_table(courses: &[CourseRecord], output: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Course", "Credits", "Grade", "Points"]);

    for (i, course) in courses.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&course.name),
            Cell::new(&course.credits),
            Cell::new(course.grade.letter()),
            Cell::new(course.grade),
        ]);
    }

    let summary = summarize(courses);
    let mut out = format!("{table}\n\n");
    if !output.is_empty() {
        out.push_str(output);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} of {} row(s) counted, {} credit(s)",
        summary.counted,
        courses.len(),
        summary.total_credits
    ));
    out
}

// Escapes text for use in element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// One `.course-row` with its name, credits and grade fields.
pub fn render_row(course: &CourseRecord) -> String {
    let mut options = String::new();
    for grade in Grade::ALL {
        let selected = if grade == course.grade { " selected" } else { "" };
        options.push_str(&format!(
            "        <option value=\"{}\"{}>{}</option>\n",
            grade,
            selected,
            grade.letter()
        ));
    }

    format!(
        "  <div class=\"course-row\">\n    \
         <input type=\"text\" class=\"course-name\" value=\"{}\" placeholder=\"Course Name\">\n    \
         <input type=\"number\" class=\"credits\" value=\"{}\" min=\"1\" placeholder=\"Credits\">\n    \
         <select class=\"grade\">\n{}    </select>\n  </div>\n",
        escape(&course.name),
        escape(&course.credits),
        options
    )
}

// Full page carrying the container, the three buttons and the output element.
pub fn render_html(courses: &[CourseRecord], output: &str) -> String {
    let rows: String = courses.iter().map(render_row).collect();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>GPA Calculator</title>\n</head>\n<body>\n\
         <div id=\"courses-container\">\n{}</div>\n\
         <button id=\"add-more-courses\">Add Course</button>\n\
         <button id=\"calculate-gpa\">Calculate GPA</button>\n\
         <button id=\"clear-courses\">Clear</button>\n\
         <div id=\"gpa-output\">{}</div>\n</body>\n</html>\n",
        rows,
        escape(output)
    )
}
