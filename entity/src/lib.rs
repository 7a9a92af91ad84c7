pub mod line;
pub mod line_stop;
pub mod stop;
pub mod stop_event;
pub mod trip;

pub mod prelude {
    pub use crate::line::Entity as Line;
    pub use crate::line_stop::Entity as LineStop;
    pub use crate::stop::Entity as Stop;
    pub use crate::stop_event::Entity as StopEvent;
    pub use crate::trip::Entity as Trip;
}
