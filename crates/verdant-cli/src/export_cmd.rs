use anyhow::Context;
use sqlx::PgPool;

use verdant_core::export;
use verdant_core::insight;
use verdant_db::queries::{care_events, garden_plants, harvests, observations};

/// Export a garden plant's full event log as CSV.
pub async fn run_export_csv(
    pool: &PgPool,
    plant_id: i64,
    output: Option<&str>,
) -> anyhow::Result<()> {
    use std::io::Write;

    let plant = garden_plants::get_garden_plant(pool, plant_id)
        .await?
        .with_context(|| format!("garden plant {plant_id} not found"))?;

    let obs = observations::list_observations_for_plant(pool, plant_id).await?;
    let care = care_events::list_care_events_for_plant(pool, plant_id).await?;
    let harvested = harvests::list_harvests_for_plant(pool, plant_id).await?;

    let timeline = insight::merge_timeline(&obs, &care, &harvested);
    let csv = export::plant_log_csv(&timeline);

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {path}"))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    writer.write_all(csv.as_bytes())?;

    if let Some(path) = output {
        println!(
            "Exported {} rows for {} to {path}",
            timeline.len(),
            plant.plant_name
        );
    }

    Ok(())
}
