/// UI layer: immediate-mode panels and the two chart views.
pub mod donut;
pub mod panels;
pub mod plot;
