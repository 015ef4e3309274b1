//! Email, domain and network address generators.

use super::pick;
use super::person::random_user_name;
use super::text::WORDS;
use bson::Bson;
use rand::Rng;

/// Reserved documentation domains (RFC 2606); mail sent here goes nowhere.
pub const SAFE_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const FREE_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

const TLDS: &[&str] = &["com", "org", "net", "io", "info", "biz"];

/// Address at a random free-mail provider.
pub fn email<R: Rng>(rng: &mut R) -> Bson {
    free_email(rng)
}

/// Address at one of the reserved `example.*` domains.
pub fn safe_email<R: Rng>(rng: &mut R) -> Bson {
    let user = random_user_name(rng);
    Bson::String(format!("{user}@{}", pick(rng, SAFE_DOMAINS)))
}

pub fn free_email<R: Rng>(rng: &mut R) -> Bson {
    let user = random_user_name(rng);
    Bson::String(format!("{user}@{}", pick(rng, FREE_EMAIL_DOMAINS)))
}

pub fn domain_name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_domain(rng))
}

fn random_domain<R: Rng>(rng: &mut R) -> String {
    format!("{}-{}.{}", pick(rng, WORDS), pick(rng, WORDS), pick(rng, TLDS))
}

pub fn url<R: Rng>(rng: &mut R) -> Bson {
    let scheme = if rng.random_bool(0.5) { "https" } else { "http" };
    Bson::String(format!("{scheme}://www.{}/", random_domain(rng)))
}

/// Public-looking IPv4 address; avoids the 0.x and 224+ ranges.
pub fn ipv4<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(format!(
        "{}.{}.{}.{}",
        rng.random_range(1..224),
        rng.random_range(0..256),
        rng.random_range(0..256),
        rng.random_range(1..255)
    ))
}
