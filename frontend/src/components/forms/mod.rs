pub mod bulk_import_form;
pub mod mao_calculator;
pub mod property_form;
pub mod remove_property_form;
pub mod transaction_form;
