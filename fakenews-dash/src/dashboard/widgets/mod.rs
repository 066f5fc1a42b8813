pub mod headline_list;
pub mod input_box;
pub mod prediction_panel;
