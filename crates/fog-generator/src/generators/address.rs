//! Postal address generators.

use super::person::LAST_NAMES;
use super::{digits, pick};
use bson::Bson;
use rand::Rng;

const CITIES: &[&str] = &[
    "Ashford", "Bridgeport", "Clearwater", "Dunmore", "Eastfield", "Fairview", "Glenwood",
    "Harrow", "Ironbridge", "Juniper", "Kingsport", "Lakeside", "Millbrook", "Northgate",
    "Oakridge", "Pinehurst", "Riverton", "Springdale", "Thornbury", "Westwood",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Place", "Way", "Boulevard",
];

const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Brazil", "Canada", "Denmark", "Egypt", "Finland", "France",
    "Germany", "India", "Japan", "Kenya", "Mexico", "Netherlands", "Norway", "Portugal",
    "Spain", "Sweden", "United Kingdom", "United States",
];

pub fn city<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(pick(rng, CITIES).to_string())
}

pub fn country<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(pick(rng, COUNTRIES).to_string())
}

pub fn street_name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_street_name(rng))
}

fn random_street_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, LAST_NAMES), pick(rng, STREET_SUFFIXES))
}

pub fn street_address<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_street_address(rng))
}

fn random_street_address<R: Rng>(rng: &mut R) -> String {
    let number = rng.random_range(1..10000);
    format!("{number} {}", random_street_name(rng))
}

/// Five digit postal code.
pub fn postcode<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(digits(rng, 5))
}

/// Single-line address: street, city and postcode.
pub fn address<R: Rng>(rng: &mut R) -> Bson {
    let street = random_street_address(rng);
    let city = pick(rng, CITIES);
    Bson::String(format!("{street}, {city} {}", digits(rng, 5)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_postcode() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = postcode(&mut rng);
        let value = value.as_str().unwrap();
        assert_eq!(value.len(), 5);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_street_address_starts_with_number() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = street_address(&mut rng);
        let number = value.as_str().unwrap().split(' ').next().unwrap();
        assert!(number.parse::<u32>().is_ok());
    }

    #[test]
    fn test_city_from_list() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = city(&mut rng);
        assert!(CITIES.contains(&value.as_str().unwrap()));
    }
}
