use rocket::launch;
use tracing_subscriber::{fmt, EnvFilter};

#[launch]
fn rocket() -> _ {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    party_rsvp::with_database(rocket::build())
}
