//! Span and event field tests
//!
//! Collects every field recorded while the user operations run and checks
//! that email addresses never reach the log output.

use std::fmt;
use std::sync::{Arc, Mutex};

use domain_booking::BookingPort;
use infra_db::FixtureBookingAdapter;
use test_utils::{seed_fixtures, NewUserBuilder};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// A recorded field: span or event name, field name, formatted value
type Recorded = (String, String, String);

#[derive(Clone, Default)]
struct FieldCollector {
    fields: Arc<Mutex<Vec<Recorded>>>,
}

struct Visitor<'a> {
    owner: &'static str,
    fields: &'a mut Vec<Recorded>,
}

impl Visit for Visitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .push((self.owner.to_string(), field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S: Subscriber> Layer<S> for FieldCollector {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        attrs.record(&mut Visitor { owner: attrs.metadata().name(), fields: &mut fields });
        // Declared fields are listed even when left empty
        for field in attrs.metadata().fields() {
            fields.push((attrs.metadata().name().to_string(), field.name().to_string(), String::new()));
        }
    }

    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        values.record(&mut Visitor { owner: "record", fields: &mut fields });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        event.record(&mut Visitor { owner: event.metadata().name(), fields: &mut fields });
    }
}

impl FieldCollector {
    fn recorded(&self) -> Vec<Recorded> {
        self.fields.lock().unwrap().clone()
    }

    fn assert_no_mention(&self, email: &str) {
        for (owner, name, value) in self.recorded() {
            assert_ne!(name, "email", "{owner} records an email field");
            assert_ne!(name, "user", "{owner} records the whole user payload");
            assert!(!value.contains(email), "{owner}.{name} leaks {email}: {value}");
        }
    }
}

#[tokio::test]
async fn test_user_operations_do_not_log_emails() {
    let collector = FieldCollector::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(collector.clone()));
    let port = FixtureBookingAdapter::new(seed_fixtures());

    port.get_user_with_email("tristanjacobs@gmail.com").await.unwrap();
    let new_user = NewUserBuilder::new().with_email("secret.guest@example.com").build();
    port.add_user(new_user.clone()).await.unwrap();
    port.add_user(new_user).await.unwrap_err();

    let spans: Vec<String> = collector.recorded().into_iter().map(|(owner, _, _)| owner).collect();
    assert!(spans.iter().any(|s| s == "get_user_with_email"));
    assert!(spans.iter().any(|s| s == "add_user"));

    collector.assert_no_mention("tristanjacobs@gmail.com");
    collector.assert_no_mention("secret.guest@example.com");
}

#[tokio::test]
async fn test_id_fields_still_recorded() {
    let collector = FieldCollector::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(collector.clone()));
    let port = FixtureBookingAdapter::new(seed_fixtures());

    port.get_user_with_id(core_kernel::UserId::new(3)).await.unwrap();

    assert!(collector
        .recorded()
        .iter()
        .any(|(owner, name, value)| owner == "get_user_with_id" && name == "user_id" && value == "USR-3"));
}
