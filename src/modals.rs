use crate::forms::AddStudentForm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    AddStudent,
    Graph,
}

/// Where a click on an open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Default)]
pub struct AddStudentModal {
    open: bool,
    pub form: AddStudentForm,
}

impl AddStudentModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    /// Closing discards whatever was typed.
    pub fn hide(&mut self) {
        self.open = false;
        self.form.reset();
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphModal {
    open: bool,
    pub title: String,
    pub body: String,
}

impl GraphModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Modals {
    pub add_student: AddStudentModal,
    pub graph: GraphModal,
}

impl Modals {
    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::AddStudent => self.add_student.is_open(),
            Overlay::Graph => self.graph.is_open(),
        }
    }

    pub fn hide(&mut self, overlay: Overlay) {
        match overlay {
            Overlay::AddStudent => self.add_student.hide(),
            Overlay::Graph => self.graph.hide(),
        }
    }

    /// Only a click on the overlay container itself closes it. Returns whether
    /// the overlay was closed.
    pub fn clicked(&mut self, overlay: Overlay, target: ClickTarget) -> bool {
        if target != ClickTarget::Backdrop || !self.is_open(overlay) {
            return false;
        }
        self.hide(overlay);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_click_closes_and_resets_add_student() {
        let mut modals = Modals::default();
        modals.add_student.show();
        modals.add_student.form.name = "Asha".into();

        assert!(modals.clicked(Overlay::AddStudent, ClickTarget::Backdrop));
        assert!(!modals.add_student.is_open());
        assert!(modals.add_student.form.name.is_empty());
    }

    #[test]
    fn content_click_keeps_overlay_open() {
        let mut modals = Modals::default();
        modals.graph.show("Attendance Report - Asha".into(), "<img>".into());

        assert!(!modals.clicked(Overlay::Graph, ClickTarget::Content));
        assert!(modals.graph.is_open());
    }

    #[test]
    fn overlays_are_independent() {
        let mut modals = Modals::default();
        modals.add_student.show();
        modals.graph.show("t".into(), "b".into());

        assert!(modals.clicked(Overlay::Graph, ClickTarget::Backdrop));
        assert!(modals.add_student.is_open());
        assert!(!modals.graph.is_open());
    }

    #[test]
    fn clicking_a_closed_overlay_does_nothing() {
        let mut modals = Modals::default();
        assert!(!modals.clicked(Overlay::AddStudent, ClickTarget::Backdrop));
    }
}
