//! Child collections of the `properties` table.
//!
//! Children are written one row at a time through the generic accessor with
//! `sort_order` taken from their position in the submitted list. Replacing a
//! collection deletes the stored rows first; like every other write this is
//! not wrapped in a transaction.

use futures::try_join;
use sqlx::PgPool;

use crate::accessor::{Direction, Filter, Query, Record, TableAccessor};
use crate::models::property::{
    FloorPlan, GalleryImage, Highlight, NearbyItem, PropertyChildRows, PropertyChildren,
    PropertyDocument, PropertyTag, School, SustainabilityFeature,
};

pub struct PropertyRepo;

impl PropertyRepo {
    /// Load every child collection of a property concurrently.
    pub async fn load_children(
        pool: &PgPool,
        property_id: &str,
    ) -> Result<PropertyChildRows, sqlx::Error> {
        let owned = Filter::new().eq("property_id", property_id);
        let ordered = Query::filter(owned.clone()).order_by("sort_order", Direction::Asc);
        let tags = Query::filter(owned).order_by("tag_id", Direction::Asc);

        let (gallery, highlights, sustainability, floor_plans, documents, schools, nearby, tags) = try_join!(
            TableAccessor::<GalleryImage>::find(pool, &ordered),
            TableAccessor::<Highlight>::find(pool, &ordered),
            TableAccessor::<SustainabilityFeature>::find(pool, &ordered),
            TableAccessor::<FloorPlan>::find(pool, &ordered),
            TableAccessor::<PropertyDocument>::find(pool, &ordered),
            TableAccessor::<School>::find(pool, &ordered),
            TableAccessor::<NearbyItem>::find(pool, &ordered),
            TableAccessor::<PropertyTag>::find(pool, &tags),
        )?;

        Ok(PropertyChildRows {
            gallery,
            highlights,
            sustainability,
            floor_plans,
            documents,
            schools,
            nearby,
            tags,
        })
    }

    /// Insert the supplied collections for a freshly created property.
    ///
    /// The first gallery image is flagged as the hero.
    pub async fn insert_children(
        pool: &PgPool,
        property_id: &str,
        children: &PropertyChildren,
    ) -> Result<(), sqlx::Error> {
        Self::write_children(pool, property_id, children, false).await
    }

    /// Replace each supplied collection; absent collections are untouched.
    pub async fn replace_children(
        pool: &PgPool,
        property_id: &str,
        children: &PropertyChildren,
    ) -> Result<(), sqlx::Error> {
        Self::write_children(pool, property_id, children, true).await
    }

    async fn write_children(
        pool: &PgPool,
        property_id: &str,
        children: &PropertyChildren,
        replace: bool,
    ) -> Result<(), sqlx::Error> {
        let owned = Filter::new().eq("property_id", property_id);
        let base = |i: usize| {
            Record::new()
                .set("property_id", property_id)
                .set("sort_order", i as i64)
        };

        if let Some(gallery) = &children.gallery {
            if replace {
                TableAccessor::<GalleryImage>::delete(pool, &owned).await?;
            }
            for (i, url) in gallery.iter().enumerate() {
                let record = base(i).set("image_url", url.as_str()).set("is_hero", i == 0);
                TableAccessor::<GalleryImage>::create(pool, &record).await?;
            }
        }

        if let Some(highlights) = &children.highlights {
            if replace {
                TableAccessor::<Highlight>::delete(pool, &owned).await?;
            }
            for (i, text) in highlights.iter().enumerate() {
                let record = base(i).set("highlight_text", text.as_str());
                TableAccessor::<Highlight>::create(pool, &record).await?;
            }
        }

        if let Some(features) = &children.sustainability {
            if replace {
                TableAccessor::<SustainabilityFeature>::delete(pool, &owned).await?;
            }
            for (i, feature) in features.iter().enumerate() {
                let record = base(i).set("feature", feature.as_str());
                TableAccessor::<SustainabilityFeature>::create(pool, &record).await?;
            }
        }

        if let Some(plans) = &children.floor_plans {
            if replace {
                TableAccessor::<FloorPlan>::delete(pool, &owned).await?;
            }
            for (i, plan) in plans.iter().enumerate() {
                let record = base(i)
                    .set("label", plan.label.as_str())
                    .set("image_url", plan.placeholder.as_str());
                TableAccessor::<FloorPlan>::create(pool, &record).await?;
            }
        }

        if let Some(documents) = &children.documents {
            if replace {
                TableAccessor::<PropertyDocument>::delete(pool, &owned).await?;
            }
            for (i, doc) in documents.iter().enumerate() {
                let record = base(i)
                    .set("label", doc.label.as_str())
                    .set("document_url", doc.url.as_str());
                TableAccessor::<PropertyDocument>::create(pool, &record).await?;
            }
        }

        if let Some(schools) = &children.schools {
            if replace {
                TableAccessor::<School>::delete(pool, &owned).await?;
            }
            for (i, school) in schools.iter().enumerate() {
                let record = base(i)
                    .set("name", school.name.as_str())
                    .set("distance", school.distance.as_deref());
                TableAccessor::<School>::create(pool, &record).await?;
            }
        }

        if let Some(nearby) = &children.nearby {
            if replace {
                TableAccessor::<NearbyItem>::delete(pool, &owned).await?;
            }
            for (i, item) in nearby.iter().enumerate() {
                let record = base(i).set("item", item.as_str());
                TableAccessor::<NearbyItem>::create(pool, &record).await?;
            }
        }

        if let Some(tags) = &children.lifestyle_tags {
            if replace {
                TableAccessor::<PropertyTag>::delete(pool, &owned).await?;
            }
            for tag in tags {
                let record = Record::new()
                    .set("property_id", property_id)
                    .set("tag", tag.as_str());
                TableAccessor::<PropertyTag>::create(pool, &record).await?;
            }
        }

        Ok(())
    }
}
