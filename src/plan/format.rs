use super::models::PlanData;
use crate::utils::time::format_local;
use chrono_tz::Tz;

/// Render a plan as a short chat message
pub fn format_plan(plan: &PlanData, tz: Tz) -> String {
    let title = plan.title().unwrap_or("Unnamed plan");
    let mut message = format!("📅 **{}**\n", title);

    message.push_str(&format!("• {}\n", format_local(&plan.time(), tz)));

    if let Some(location) = plan.location().filter(|l| !l.is_empty()) {
        message.push_str(&format!("• 📍 {}\n", location));
    }

    if plan.guests().is_some() {
        message.push_str(&format!(
            "• Going: {}, Invited: {}, Declined: {}\n",
            plan.going().count(),
            plan.invited().count(),
            plan.declined().count()
        ));
    }

    message
}
