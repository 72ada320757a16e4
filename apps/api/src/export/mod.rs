// Export encoding: projected records → CSV or JSON file bodies.

pub mod encode;
pub mod handlers;
