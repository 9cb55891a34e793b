//! Markup builders for the activity list and the selection control.

use shared::{domain::spots_left, protocol::ActivityDetails};

use crate::surface::Element;

/// Marker class that identifies a remove control for click dispatch.
pub const REMOVE_CONTROL_CLASS: &str = "delete-participant";
pub const PARTICIPANT_ITEM_CLASS: &str = "participant-item";
pub const EMPTY_PARTICIPANTS_TEXT: &str = "No participants yet";
pub const PLACEHOLDER_OPTION_TEXT: &str = "-- Select an activity --";
pub const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";

pub fn render_participants(participants: &[String], activity_name: &str) -> Vec<Element> {
    if participants.is_empty() {
        return vec![Element::new("li")
            .with_class(PARTICIPANT_ITEM_CLASS)
            .with_class("empty")
            .with_child(Element::new("em").with_text(EMPTY_PARTICIPANTS_TEXT))];
    }

    participants
        .iter()
        .map(|email| {
            Element::new("li")
                .with_class(PARTICIPANT_ITEM_CLASS)
                .with_data("email", email.clone())
                .with_child(
                    Element::new("span")
                        .with_class("participant-email")
                        .with_text(email.clone()),
                )
                .with_child(remove_control(activity_name, email))
        })
        .collect()
}

fn remove_control(activity_name: &str, email: &str) -> Element {
    Element::new("button")
        .with_class(REMOVE_CONTROL_CLASS)
        .with_data("activity", activity_name)
        .with_data("email", email)
        .with_attr("aria-label", format!("Remove {email} from {activity_name}"))
        .with_text("×")
}

pub fn render_activity_card(name: &str, details: &ActivityDetails) -> Element {
    let spots = spots_left(details.max_participants, &details.participants);

    Element::new("div")
        .with_class("activity-card")
        .with_child(Element::new("h4").with_text(name))
        .with_child(Element::new("p").with_text(details.description.clone()))
        .with_child(labelled_paragraph("Schedule:", &details.schedule))
        .with_child(labelled_paragraph(
            "Availability:",
            &format!("{spots} spots left"),
        ))
        .with_child(
            Element::new("div")
                .with_class("participants-section")
                .with_child(Element::new("strong").with_text("Participants:"))
                .with_child(
                    Element::new("ul")
                        .with_class("participants-list")
                        .with_children(render_participants(&details.participants, name)),
                ),
        )
}

fn labelled_paragraph(label: &str, value: &str) -> Element {
    Element::new("p")
        .with_child(Element::new("strong").with_text(label))
        .with_text(format!(" {value}"))
}

pub fn placeholder_option() -> Element {
    Element::new("option")
        .with_attr("value", "")
        .with_text(PLACEHOLDER_OPTION_TEXT)
}

pub fn activity_option(name: &str) -> Element {
    Element::new("option").with_attr("value", name).with_text(name)
}

pub fn load_failure_notice() -> Element {
    Element::new("p").with_text(LOAD_FAILURE_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(max_participants: u32, participants: &[&str]) -> ActivityDetails {
        ActivityDetails {
            description: "Learn strategies and compete in chess tournaments".into(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
            max_participants,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn empty_roster_renders_single_placeholder_without_controls() {
        let items = render_participants(&[], "Chess Club");
        assert_eq!(items.len(), 1);
        assert!(items[0].has_class("empty"));
        assert_eq!(items[0].text_content(), EMPTY_PARTICIPANTS_TEXT);
        assert!(items[0]
            .find_all(|e| e.has_class(REMOVE_CONTROL_CLASS))
            .is_empty());
    }

    #[test]
    fn each_participant_gets_a_tagged_remove_control() {
        let roster = vec![
            "michael@mergington.edu".to_string(),
            "daniel@mergington.edu".to_string(),
            "michael@mergington.edu".to_string(),
        ];
        let items = render_participants(&roster, "Chess Club");
        assert_eq!(items.len(), 3);

        for (item, email) in items.iter().zip(&roster) {
            assert_eq!(item.data("email"), Some(email.as_str()));
            let controls = item.find_all(|e| e.has_class(REMOVE_CONTROL_CLASS));
            assert_eq!(controls.len(), 1);
            assert_eq!(controls[0].data("activity"), Some("Chess Club"));
            assert_eq!(controls[0].data("email"), Some(email.as_str()));
            assert_eq!(
                controls[0].attr("aria-label"),
                Some(format!("Remove {email} from Chess Club").as_str())
            );
        }
    }

    #[test]
    fn card_shows_spots_left_without_clamping() {
        let card = render_activity_card("Chess Club", &details(12, &["a@b.com", "c@d.com"]));
        assert!(card.text_content().contains("Availability: 10 spots left"));

        let overfull = render_activity_card("Tiny", &details(1, &["a@b.com", "c@d.com"]));
        assert!(overfull.text_content().contains("Availability: -1 spots left"));
    }

    #[test]
    fn card_markup_matches_page_layout() {
        let html = render_activity_card("Chess Club", &details(12, &[])).to_html();
        assert!(html.starts_with(r#"<div class="activity-card"><h4>Chess Club</h4>"#));
        assert!(html.contains("<p><strong>Schedule:</strong> Fridays, 3:30 PM - 5:00 PM</p>"));
        assert!(html.contains(r#"<ul class="participants-list"><li class="participant-item empty"><em>No participants yet</em></li></ul>"#));
    }

    #[test]
    fn remove_control_markup_carries_both_keys() {
        let items = render_participants(&["a@b.com".to_string()], "Chess Club");
        assert_eq!(
            items[0].to_html(),
            concat!(
                r#"<li class="participant-item" data-email="a@b.com">"#,
                r#"<span class="participant-email">a@b.com</span>"#,
                r#"<button class="delete-participant" data-activity="Chess Club" data-email="a@b.com" aria-label="Remove a@b.com from Chess Club">×</button>"#,
                "</li>"
            )
        );
    }
}
