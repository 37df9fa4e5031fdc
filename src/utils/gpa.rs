use std::sync::OnceLock;
use regex::Regex;
use crate::models::CourseRecord;

pub const NO_DATA_MESSAGE: &str = "Enter course details to calculate GPA.";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpaSummary {
    pub total_points: f64,
    pub total_credits: f64,
    pub counted: usize,
    pub gpa: Option<f64>,
}

impl GpaSummary {
    // The text shown in the output element after a calculation.
    pub fn message(&self) -> String {
        match self.gpa {
            Some(gpa) => format!("Your GPA: {:.3}", gpa),
            None => NO_DATA_MESSAGE.to_string(),
        }
    }
}

fn credits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("credits pattern is valid")
    })
}

// Accepts only a whole valid floating-point number, as a number input does.
// Anything else, surrounding whitespace included, is NaN.
pub fn parse_credits(raw: &str) -> f64 {
    if !credits_pattern().is_match(raw) {
        return f64::NAN;
    }
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

// Credit-weighted GPA over every row. Rows whose credits are not a finite positive number
// are left out of both sums.
pub fn summarize(courses: &[CourseRecord]) -> GpaSummary {
    let mut summary = GpaSummary::default();

    for course in courses {
        let credits = parse_credits(&course.credits);
        if !credits.is_finite() || credits <= 0.0 {
            continue;
        }
        summary.total_points += credits * course.grade.points();
        summary.total_credits += credits;
        summary.counted += 1;
    }

    if summary.counted > 0 && summary.total_credits > 0.0 {
        summary.gpa = Some(summary.total_points / summary.total_credits);
    }
    summary
}

// Output text for the current rows.
pub fn calculate(courses: &[CourseRecord]) -> String {
    summarize(courses).message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn row(name: &str, credits: &str, grade: &str) -> CourseRecord {
        CourseRecord::new(Some(name), Some(credits), Some(grade.parse().unwrap()))
    }

    #[test]
    fn parse_credits_accepts_only_whole_numbers() {
        assert_eq!(parse_credits("3"), 3.0);
        assert_eq!(parse_credits("2.5"), 2.5);
        assert_eq!(parse_credits(".5"), 0.5);
        assert_eq!(parse_credits("1e1"), 10.0);
        assert_eq!(parse_credits("1.5E-1"), 0.15);
        assert_eq!(parse_credits("-2"), -2.0);
        for raw in ["", "abc", "4abc", " 2.5", "2.5 ", "5.", "+3", "3 credits", "Infinity", "1e999"] {
            assert!(!parse_credits(raw).is_finite(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn credits_with_trailing_text_are_skipped() {
        let courses = vec![row("A", "3", "4.0"), row("B", "4abc", "3.0")];
        assert_eq!(calculate(&courses), "Your GPA: 4.000");

        let courses = vec![row("X", "3 credits", "4.0")];
        assert_eq!(calculate(&courses), NO_DATA_MESSAGE);

        for raw in [" 2.5", "5.", "+3"] {
            let courses = vec![CourseRecord::new(Some("X"), Some(raw), None)];
            assert_eq!(calculate(&courses), NO_DATA_MESSAGE, "{:?} was counted", raw);
        }
    }

    #[test]
    fn weighted_average_over_same_grade() {
        let courses = vec![row("DSA", "2", "3.3"), row("Com", "5", "3.3")];
        let summary = summarize(&courses);
        assert_eq!(summary.counted, 2);
        assert_eq!(summary.total_credits, 7.0);
        assert!((summary.total_points - 23.1).abs() < 1e-9);
        assert_eq!(summary.message(), "Your GPA: 3.300");
    }

    #[test]
    fn zero_credits_give_no_data_message() {
        let courses = vec![row("X", "0", "4.0")];
        assert_eq!(calculate(&courses), NO_DATA_MESSAGE);
        assert_eq!(summarize(&courses).gpa, None);
    }

    #[test]
    fn non_numeric_credits_are_skipped() {
        let courses = vec![row("A", "3", "4.0"), row("B", "abc", "3.0")];
        assert_eq!(calculate(&courses), "Your GPA: 4.000");
    }

    #[test]
    fn blank_and_negative_rows_contribute_nothing() {
        let courses = vec![
            CourseRecord::blank(),
            row("Neg", "-3", "0.0"),
            row("Elec", "3", "3.0"),
        ];
        let summary = summarize(&courses);
        assert_eq!(summary.counted, 1);
        assert_eq!(summary.total_credits, 3.0);
        assert_eq!(summary.message(), "Your GPA: 3.000");
    }

    #[test]
    fn empty_list_gives_no_data_message() {
        assert_eq!(calculate(&[]), NO_DATA_MESSAGE);
    }

    #[test]
    fn default_seed_gpa() {
        let courses = vec![
            row("Differential Eqn", "2", "4.0"),
            row("DSA", "2", "3.3"),
            row("Com", "5", "3.3"),
            row("Linear Alge", "3", "3.3"),
            row("Discrete", "3", "3.7"),
            row("Elec", "3", "3.0"),
        ];
        // (8 + 6.6 + 16.5 + 9.9 + 11.1 + 9) / 18 = 61.1 / 18
        assert_eq!(calculate(&courses), "Your GPA: 3.394");
    }

    #[test]
    fn calculation_is_idempotent() {
        let courses = vec![row("A", "3", "A-"), row("B", "4", "C+")];
        assert_eq!(calculate(&courses), calculate(&courses));
    }

    #[test]
    fn f_grade_counts_towards_credits() {
        let courses = vec![
            CourseRecord::new(Some("Fail"), Some("2"), Some(Grade::F)),
            CourseRecord::new(Some("Pass"), Some("2"), Some(Grade::A)),
        ];
        assert_eq!(calculate(&courses), "Your GPA: 2.000");
    }
}
