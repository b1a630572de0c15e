/// UI layer: egui panels and dashboard widgets. Pure rendering; all numbers
/// come precomputed from [`crate::analytics::DashboardOutputs`].
pub mod panels;
pub mod views;
