use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Database,
};

use crate::error::StoreError;

/// Allocates the next integer id for `name` from the `counters` collection.
pub async fn next_id(db: &Database, name: &str) -> Result<i64, StoreError> {
    let counters = db.collection::<Document>("counters");

    let opts = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let counter = counters
        .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } }, opts)
        .await?
        .ok_or_else(|| StoreError::Database(format!("counter {name} missing after upsert")))?;

    Ok(counter.get_i64("seq")?)
}
