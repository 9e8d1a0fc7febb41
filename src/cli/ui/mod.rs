pub mod bar_chart;
pub mod table_renderer;
pub mod terminal_surface;
