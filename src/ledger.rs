use anyhow::{bail, Result};
use log::{debug, info};
use crate::models::{CourseRecord, Grade};
use crate::utils::gpa::calculate;
use crate::utils::storage::{load, save, Store};

// Field values supplied by the user. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInput {
    pub name: Option<String>,
    pub credits: Option<String>,
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(RowInput),
    // Rows are addressed by 0-based position.
    Edit(usize, RowInput),
    Remove(usize),
    Calculate,
    Clear,
}

impl Action {
    // Everything but Calculate changes the list.
    fn mutates(&self) -> bool {
        !matches!(self, Action::Calculate)
    }
}

// Result of applying one action: the new list and the output text to display, if it changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub courses: Vec<CourseRecord>,
    pub output: Option<String>,
}

// Rejects a position past the end of the list.
fn check_row(courses: &[CourseRecord], index: usize) -> Result<()> {
    if index >= courses.len() {
        bail!("Row {} does not exist, the ledger has {} row(s)", index + 1, courses.len());
    }
    Ok(())
}

// Pure transition over the course list.
pub fn apply(mut courses: Vec<CourseRecord>, action: &Action) -> Result<Transition> {
    let output = match action {
        Action::Add(input) => {
            courses.push(CourseRecord::new(
                input.name.as_deref(),
                input.credits.as_deref(),
                input.grade,
            ));
            None
        }
        Action::Edit(index, input) => {
            check_row(&courses, *index)?;
            let course = &mut courses[*index];
            if let Some(name) = &input.name {
                course.name = name.clone();
            }
            if let Some(credits) = &input.credits {
                course.credits = credits.clone();
            }
            if let Some(grade) = input.grade {
                course.grade = grade;
            }
            None
        }
        Action::Remove(index) => {
            check_row(&courses, *index)?;
            courses.remove(*index);
            None
        }
        Action::Calculate => Some(calculate(&courses)),
        Action::Clear => {
            courses = vec![CourseRecord::blank()];
            Some(String::new())
        }
    };
    Ok(Transition { courses, output })
}

// Owns the store and the current list. The list is only replaced once the save succeeded.
pub struct Ledger<S: Store> {
    store: S,
    courses: Vec<CourseRecord>,
    output: String,
}

impl<S: Store> Ledger<S> {
    // Loads the saved list, or the defaults. Opening never writes.
    pub fn open(store: S) -> Result<Self> {
        let courses = load(&store)?;
        info!("Opened ledger with {} course(s)", courses.len());
        Ok(Ledger { store, courses, output: String::new() })
    }

    // Current rows in display order.
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    // Applies one action, saves the result, then commits it and returns the output text.
    pub fn dispatch(&mut self, action: Action) -> Result<&str> {
        debug!("Dispatching {:?}", action);
        let transition = apply(self.courses.clone(), &action)?;

        // Calculate persists the unchanged list too, so the store always mirrors the view.
        save(&mut self.store, &transition.courses)?;
        if action.mutates() {
            info!("Ledger now has {} course(s)", transition.courses.len());
        }

        self.courses = transition.courses;
        if let Some(output) = transition.output {
            self.output = output;
        }
        Ok(&self.output)
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}
