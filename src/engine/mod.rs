pub mod bit_window;
pub mod blocks;
pub mod med_calc;
pub mod ranked_window;
