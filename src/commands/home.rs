use std::sync::Arc;

use tabled::Tabled;
use tracing::debug;

use crate::cli::{HomeArgs, OutputFormat};
use crate::client::GraphbookApi;
use crate::config::Config;
use crate::error::Result;
use crate::home::HomeView;
use crate::output::{self, format_date, name_colored, truncate};
use crate::session::SessionService;
use crate::types::Student;

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Courses")]
    courses: usize,
    #[tabled(rename = "Joined")]
    joined: String,
    #[tabled(rename = "Bio")]
    bio: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            name: name_colored(&student.full_name()),
            email: student.email_address.clone(),
            courses: student.course_offerings.len(),
            joined: format_date(student.created_date),
            bio: truncate(student.bio.as_deref().unwrap_or_default(), 40),
        }
    }
}

fn compact_line(student: &Student) -> String {
    format!("{}\t{}", student.email_address, student.full_name())
}

pub async fn run(api: Arc<dyn GraphbookApi>, config: &Config, args: HomeArgs) -> Result<()> {
    let session = SessionService::from_config(config, args.email.as_deref())?;
    debug!(logged_in = session.is_logged_in(), "session ready");

    let mut view = HomeView::new(api, &session, config.session_timeout());

    let users = view.init().await?;

    if users.is_empty() {
        output::print_message("You are connected to everyone. Nobody left to suggest.");
        return Ok(());
    }

    if matches!(output::format(), OutputFormat::Table) {
        let who = view
            .current_user()
            .map(|u| {
                let name = u.full_name();
                if name.is_empty() {
                    u.email_address.clone()
                } else {
                    name
                }
            })
            .unwrap_or_default();
        println!("{}", output::heading(&format!("People {who} may know")));
    }
    output::print_table(view.users(), |s| StudentRow::from(s), |s| compact_line(s));

    Ok(())
}
