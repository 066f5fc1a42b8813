use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use super::controller::{Completion, DashboardController, DashboardState};
use crate::backend::NewsBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Headlines,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Input => Focus::Headlines,
            Focus::Headlines => Focus::Input,
        }
    }
}

pub struct App {
    pub controller: DashboardController,
    pub focus: Focus,
    pub selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        backend: Arc<dyn NewsBackend>,
        initial: DashboardState,
    ) -> (Self, UnboundedReceiver<Completion>) {
        let (controller, completions) = DashboardController::new(backend, initial);
        let app = Self {
            controller,
            focus: Focus::Headlines,
            selected: 0,
            should_quit: false,
        };
        (app, completions)
    }

    pub fn state(&self) -> &DashboardState {
        self.controller.state()
    }

    pub fn on_completion(&mut self, completion: Completion) {
        if self.controller.apply(completion) {
            self.clamp_selection();
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn next_source(&mut self) {
        let next = self.state().source.next();
        self.controller.set_source(next);
    }

    pub fn previous_source(&mut self) {
        let previous = self.state().source.previous();
        self.controller.set_source(previous);
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.state().headlines.len() {
            self.selected += 1;
        }
    }

    pub fn analyze_selected(&mut self) {
        let index = self.selected;
        self.controller.analyze_headline(index);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn clamp_selection(&mut self) {
        let len = self.state().headlines.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
