pub mod address_autocomplete;
pub mod cash_flow_summary;
pub mod form_field;
pub mod forms;
pub mod partner_rows;
pub mod password_strength;
pub mod run_comps_button;
