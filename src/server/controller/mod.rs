pub mod line;
pub mod stop;
pub mod trip;
