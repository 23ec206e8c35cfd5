//! TestRail resource methods.
//!
//! Each submodule adds the methods of one API area to [`TestRailClient`]
//! and defines the option structures those methods take:
//!
//! | Module | Methods |
//! |--------|---------|
//! | `projects` | `get_project`, `get_projects` |
//! | `suites` | `get_suites`, `get_suite`, `add_suite`, `update_suite` |
//! | `runs` | `get_run`, `get_runs`, `add_run`, `update_run`, `close_run` |
//! | `plans` | `get_plan`, `get_plans`, `add_plan`, `add_plan_entry` |
//! | `tests` | `get_test`, `get_tests` |
//! | `sections` | `get_section`, `get_sections`, `add_section`, `delete_section` |
//! | `cases` | `get_case`, `get_cases`, `add_case`, `update_case`, `delete_case` |
//! | `results` | `get_results`, `add_result_for_case`, `add_results_for_cases` |
//! | `statuses` | `get_statuses`, `status_label` |
//!
//! Methods return the server's JSON unchanged. Options are folded into the
//! query string for GET requests and into the payload for POST requests;
//! list values travel as comma-separated strings.
//!
//! [`TestRailClient`]: crate::TestRailClient

mod cases;
mod params;
mod plans;
mod projects;
mod results;
mod runs;
mod sections;
mod statuses;
mod suites;

pub use cases::{CaseFilter, CaseUpdate, NewCase};
pub use plans::{NewPlan, PlanEntry, PlanEntryRun, PlanFilter};
pub use results::{CaseResult, ResultFields};
pub use runs::{NewRun, RunFilter, RunUpdate};
pub use sections::NewSection;
pub use statuses::{Status, StatusTable};
