use tracing::debug;

use crate::error::Result;
use crate::product::{AttributeAssignment, ProductAttribute};
use crate::store::AttributeValueStore;

/// Counts of rows touched by one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub created: usize,
    pub updated: usize,
}

/// Merge submitted attribute values into the stored rows of one product.
///
/// Pairs are applied one at a time in input order: an existing
/// `(product_id, attribute_id)` row gets its value overwritten, a missing one
/// is inserted. Rows not mentioned in `assignments` are left as they are, and
/// a repeated attribute id is simply applied again, so the last occurrence
/// wins. The first store failure stops the loop; rows written before it stay
/// written.
pub async fn reconcile_attributes(
    store: &dyn AttributeValueStore,
    product_id: i32,
    assignments: &[AttributeAssignment],
) -> Result<ReconcileOutcome> {
    let mut outcome = ReconcileOutcome::default();

    for assignment in assignments {
        let existing = store.find(product_id, assignment.attribute_id).await?;
        let is_new = existing.is_none();

        let row = match existing {
            Some(mut row) => {
                row.value.clone_from(&assignment.value);
                row
            }
            None => ProductAttribute {
                product_id,
                attribute_id: assignment.attribute_id,
                value: assignment.value.clone(),
            },
        };
        store.upsert(row).await?;

        if is_new {
            outcome.created += 1;
        } else {
            outcome.updated += 1;
        }
        debug!(
            product_id,
            attribute_id = assignment.attribute_id,
            created = is_new,
            "Attribute value written"
        );
    }

    Ok(outcome)
}
