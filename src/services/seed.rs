// src/services/seed.rs
// DOCUMENTATION: Startup data: administrator account and the default amenity catalog
// PURPOSE: Idempotent; existing rows are left untouched

use crate::config::Config;
use crate::errors::HbnbError;
use crate::models::{AmenityRequest, CreateUserRequest};
use crate::services::HbnbFacade;

pub const DEFAULT_AMENITIES: [&str; 23] = [
    "WiFi",
    "Kitchen",
    "Washer",
    "Dryer",
    "Air Conditioning",
    "Heating",
    "Dedicated Workspace",
    "TV",
    "Hair Dryer",
    "Iron",
    "Pool",
    "Hot Tub",
    "Free Parking",
    "EV Charger",
    "Crib",
    "Gym",
    "BBQ Grill",
    "Breakfast",
    "Indoor Fireplace",
    "Smoking Allowed",
    "Beachfront",
    "Waterfront",
    "Ski-in/Ski-out",
];

/// Create the admin user and default amenities when missing
/// Returns how many rows were created
pub async fn seed_initial_data(facade: &HbnbFacade, config: &Config) -> Result<usize, HbnbError> {
    let mut created = 0;

    if facade.get_user_by_email(&config.admin_email).await?.is_none() {
        let admin = CreateUserRequest {
            first_name: "Admin".to_string(),
            last_name: "HBnB".to_string(),
            email: config.admin_email.clone(),
            password: config.admin_password.clone(),
            is_admin: true,
        };
        facade.create_user(&admin).await?;
        log::info!("Seeded administrator account {}", config.admin_email);
        created += 1;
    }

    for name in DEFAULT_AMENITIES {
        if facade.get_amenity_by_name(name).await?.is_some() {
            continue;
        }
        facade
            .create_amenity(&AmenityRequest {
                name: name.to_string(),
            })
            .await?;
        created += 1;
    }

    log::info!("Seeding finished, {} rows created", created);
    Ok(created)
}
