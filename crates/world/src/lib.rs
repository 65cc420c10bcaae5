mod drops;
mod inventory;
mod time;
mod weather;

pub use drops::*;
pub use inventory::*;
pub use time::*;
pub use weather::*;
