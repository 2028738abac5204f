pub mod card;
pub mod filter;
pub mod grid;

pub use card::{build_card, Card, NO_VIEW_DATA};
pub use filter::{apply_filters, FilterState, ALL_CATEGORIES};
pub use grid::{
    apply_columns, columns_for_terminal, columns_for_width, GridState, DEFAULT_CELL_WIDTH_PX,
    INITIAL_COLUMNS, RESIZE_DEBOUNCE,
};
