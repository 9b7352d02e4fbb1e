use filmorate_catalog::User;
use filmorate_service::Services;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::print_json;
use crate::CliError;

/// List a user's friends, or the friends they share with `common`.
pub(crate) fn run_friends(
    svc: &Services,
    user_id: i64,
    common: Option<i64>,
    json: bool,
) -> Result<(), CliError> {
    let (title, friends) = match common {
        Some(other_id) => (
            format!("Friends shared by users {} and {}", user_id, other_id),
            svc.friends.common_friends(user_id, other_id)?,
        ),
        None => {
            let user = svc.users.user(user_id)?;
            (
                format!("Friends of {}", user.display_name()),
                svc.friends.friends(user_id)?,
            )
        }
    };
    if json {
        return print_json(&friends);
    }

    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    print_users(&friends);
    Ok(())
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        log::info!("  {}", "(none)".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for user in users {
        log::info!(
            "  {:>5}  {:<20}  {}",
            user.id,
            user.login,
            user.display_name().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}
