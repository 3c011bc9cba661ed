//! Askama templates for the departure board page.

use askama::Template;

use crate::board::Board;
use crate::domain::{DisplayPrediction, TimeContext};

/// The departure board page.
#[derive(Template)]
#[template(path = "departures.html")]
pub struct DeparturesTemplate {
    pub title: String,
    pub departures: Vec<DisplayPrediction>,
    pub current_time: Option<TimeContext>,
}

impl DeparturesTemplate {
    pub fn new(title: impl Into<String>, board: Board) -> Self {
        Self {
            title: title.into(),
            departures: board.departures,
            current_time: board.current_time,
        }
    }
}
