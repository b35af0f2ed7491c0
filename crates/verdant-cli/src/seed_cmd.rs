use anyhow::Result;
use sqlx::PgPool;

use verdant_db::queries::blog_posts::{self, NewBlogPost};
use verdant_db::queries::plants::{self, NewPlant};

/// Seed the storefront with the starter catalog and one welcome post.
///
/// A no-op when the catalog already has plants, so it is safe to run on
/// every deploy.
pub async fn run_seed(pool: &PgPool) -> Result<()> {
    if plants::count_plants(pool).await? > 0 {
        println!("Catalog already seeded; nothing to do.");
        return Ok(());
    }

    let samples = [
        NewPlant {
            name: "Garden Rose".to_string(),
            scientific_name: Some("Rosa hybrida".to_string()),
            description: Some(
                "Beautiful hybrid tea rose with perfect blooms and lovely fragrance. \
                 Ideal for cutting gardens."
                    .to_string(),
            ),
            price: 24.99,
            category: "Flowers".to_string(),
            image_url: None,
        },
        NewPlant {
            name: "Lavender".to_string(),
            scientific_name: Some("Lavandula angustifolia".to_string()),
            description: Some(
                "English lavender known for its calming scent and beautiful purple spikes. \
                 Perfect for aromatherapy."
                    .to_string(),
            ),
            price: 18.99,
            category: "Herbs".to_string(),
            image_url: None,
        },
        NewPlant {
            name: "Snake Plant".to_string(),
            scientific_name: Some("Sansevieria trifasciata".to_string()),
            description: Some(
                "Low-maintenance indoor plant that purifies air. Thrives in low light \
                 conditions."
                    .to_string(),
            ),
            price: 32.99,
            category: "Indoor Plants".to_string(),
            image_url: None,
        },
        NewPlant {
            name: "Cherry Tomato".to_string(),
            scientific_name: Some("Solanum lycopersicum".to_string()),
            description: Some(
                "Sweet cherry tomatoes perfect for container gardening. High yield and easy \
                 to grow."
                    .to_string(),
            ),
            price: 12.99,
            category: "Vegetables".to_string(),
            image_url: None,
        },
        NewPlant {
            name: "Sunflower".to_string(),
            scientific_name: Some("Helianthus annuus".to_string()),
            description: Some(
                "Tall, cheerful sunflowers that attract pollinators and brighten any garden."
                    .to_string(),
            ),
            price: 8.99,
            category: "Flowers".to_string(),
            image_url: None,
        },
        NewPlant {
            name: "Basil".to_string(),
            scientific_name: Some("Ocimum basilicum".to_string()),
            description: Some(
                "Aromatic herb essential for Italian cuisine. Easy to grow in containers or \
                 garden beds."
                    .to_string(),
            ),
            price: 6.99,
            category: "Herbs".to_string(),
            image_url: None,
        },
    ];

    for sample in &samples {
        plants::insert_plant(pool, sample).await?;
    }

    blog_posts::insert_blog_post(
        pool,
        &NewBlogPost {
            title: "Welcome to the garden".to_string(),
            content: "Notes from the nursery: what we are planting this season and how we \
                      keep it alive."
                .to_string(),
            tags: Some("welcome,seasonal".to_string()),
            published: true,
        },
    )
    .await?;

    println!("Seeded {} plants and 1 blog post.", samples.len());
    Ok(())
}
