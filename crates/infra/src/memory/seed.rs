use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;

use crate::memory::{
    memory_context::MemoryContext,
    repositories::{shares::ShareMemory, subscriptions::SubscriptionMemory, users::UserMemory},
};
use domain::{
    entities::{
        shares::InsertShareEntity, subscriptions::InsertSubscriptionEntity,
        users::InsertUserEntity,
    },
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::enums::share_roles::ShareRole,
};

/// Demo fixtures: three users, one shared subscription with a pending
/// invite. Matches the dataset the frontend demo expects.
pub async fn demo_data(store: &Arc<MemoryContext>) -> Result<()> {
    let users = UserMemory::new(Arc::clone(store));
    let subscriptions = SubscriptionMemory::new(Arc::clone(store));
    let shares = ShareMemory::new(Arc::clone(store));

    let alice = users
        .insert(InsertUserEntity {
            email: "alice.chen@university.edu".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Chen".to_string(),
            phone: Some("+1 (555) 123-4567".to_string()),
            profile_image_url: None,
            is_verified: true,
        })
        .await?;

    let bob = users
        .insert(InsertUserEntity {
            email: "bob.johnson@gmail.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Johnson".to_string(),
            phone: Some("+1 (555) 234-5678".to_string()),
            profile_image_url: None,
            is_verified: true,
        })
        .await?;

    users
        .insert(InsertUserEntity {
            email: "carol.davis@student.edu".to_string(),
            first_name: "Carol".to_string(),
            last_name: "Davis".to_string(),
            phone: Some("+1 (555) 345-6789".to_string()),
            profile_image_url: None,
            is_verified: true,
        })
        .await?;

    let netflix = subscriptions
        .insert(InsertSubscriptionEntity {
            owner_id: alice.id,
            name: "Netflix Premium".to_string(),
            description: Some("4K family plan".to_string()),
            service_url: Some("https://netflix.com".to_string()),
            category: Some("streaming".to_string()),
            monthly_cost: 15.49,
            billing_cycle: "monthly".to_string(),
            max_members: 4,
            next_billing_date: Utc::now() + Duration::days(12),
            auto_renewal: true,
        })
        .await?;

    shares
        .insert_pending(
            InsertShareEntity {
                subscription_id: netflix.id,
                member_id: bob.id,
                role: ShareRole::Member.to_string(),
                share_percentage: 25.0,
                fixed_amount: 0.0,
                invited_by: alice.id,
            },
            true,
        )
        .await?;

    info!("Demo data seeded");
    Ok(())
}
