pub mod assignments;

pub mod competitions;

pub mod frontend;

pub mod grading;

pub mod participants;

pub mod reports;

pub mod submissions;

pub mod system;

pub use assignments::configure_assignments_routes;
pub use competitions::configure_competitions_routes;
pub use frontend::configure_frontend_routes;
pub use grading::configure_grading_routes;
pub use participants::configure_participants_routes;
pub use reports::configure_reports_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;
