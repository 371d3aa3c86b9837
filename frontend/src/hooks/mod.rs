pub mod use_autocomplete;
pub mod use_categories;
pub mod use_debounce;
