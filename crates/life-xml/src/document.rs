//! Element names and the deserialized shape of an input document.

use serde::Deserialize;

pub const WORLD: &str = "world";
pub const ITERATIONS: &str = "iterations";
pub const CELLS: &str = "cells";
pub const SPECIES: &str = "species";
pub const ORGANISMS: &str = "organisms";
pub const ORGANISM: &str = "organism";
pub const X_POS: &str = "x_pos";
pub const Y_POS: &str = "y_pos";

/// Root of an input document. The root element's own name is not checked.
///
/// Every value is kept as raw text so that missing elements and bad numbers can be reported
/// by field name instead of as a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct LifeDocument {
    pub world: Option<WorldSection>,
    pub organisms: Option<OrganismsSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorldSection {
    pub iterations: Option<String>,
    pub cells: Option<String>,
    pub species: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrganismsSection {
    #[serde(default)]
    pub organism: Vec<OrganismRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrganismRecord {
    pub x_pos: Option<String>,
    pub y_pos: Option<String>,
    pub species: Option<String>,
}
