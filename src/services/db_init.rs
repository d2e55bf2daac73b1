use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use crate::error::StoreError;

pub async fn ensure_indexes(db: &Database) -> Result<(), StoreError> {
    // users: unique email
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // subscriptions: scan filter, and listing per user. No uniqueness on
    // (user_id, ticker), duplicates are separate alerts.
    {
        let col = db.collection::<mongodb::bson::Document>("subscriptions");
        let model = IndexModel::builder()
            .keys(doc! { "enabled": 1 })
            .build();

        col.create_index(model, None).await?;

        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None).await?;
    }

    Ok(())
}
