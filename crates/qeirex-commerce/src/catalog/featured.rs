//! The storefront's featured product set.

use crate::catalog::Product;
use crate::money::Money;

struct Seed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    price_cents: i64,
    rating: f32,
    reviews: u32,
    image: &'static str,
    tag: &'static str,
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: "prod_1",
        name: "Coffee Blend",
        category: "COFFEE",
        description: "For cleaner sessions",
        price_cents: 2299,
        rating: 4.8,
        reviews: 128,
        image: "/products/coffee-blend.jpg",
        tag: "Best Seller",
    },
    Seed {
        id: "prod_2",
        name: "Espresso Blend",
        category: "COFFEE",
        description: "Rich coffee flavor",
        price_cents: 2399,
        rating: 4.7,
        reviews: 98,
        image: "/products/espresso-blend.jpg",
        tag: "New",
    },
    Seed {
        id: "prod_3",
        name: "Detoxification Mix",
        category: "DETOX",
        description: "Natural cleansing blend",
        price_cents: 2499,
        rating: 4.8,
        reviews: 145,
        image: "/products/detox-mix.jpg",
        tag: "Best Seller",
    },
    Seed {
        id: "prod_4",
        name: "Green Vitality",
        category: "DETOX",
        description: "Energizing herbal blend",
        price_cents: 2699,
        rating: 4.8,
        reviews: 112,
        image: "/products/green-vitality.jpg",
        tag: "Popular",
    },
    Seed {
        id: "prod_5",
        name: "Rose Petal Spa",
        category: "BATH",
        description: "Luxurious bath experience",
        price_cents: 3199,
        rating: 4.9,
        reviews: 203,
        image: "/products/rose-petal-spa.jpg",
        tag: "Premium",
    },
    Seed {
        id: "prod_6",
        name: "Lavender Dreams",
        category: "BATH",
        description: "Relaxing herbal blend",
        price_cents: 2299,
        rating: 4.7,
        reviews: 94,
        image: "/products/lavender-dreams.jpg",
        tag: "Popular",
    },
    Seed {
        id: "prod_7",
        name: "Premium Smoking Blend",
        category: "SMOKING",
        description: "Smooth herbal experience",
        price_cents: 2899,
        rating: 4.9,
        reviews: 187,
        image: "/products/smoking-blend.jpg",
        tag: "Best Seller",
    },
    Seed {
        id: "prod_8",
        name: "Calming Mix",
        category: "SMOKING",
        description: "Relaxing smoking blend",
        price_cents: 2699,
        rating: 4.6,
        reviews: 89,
        image: "/products/calming-mix.jpg",
        tag: "New",
    },
];

pub(crate) fn featured_products() -> Vec<Product> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(position, seed)| {
            Product::new(seed.id, seed.name, Money::new(seed.price_cents))
                .with_category(seed.category)
                .with_description(seed.description)
                .with_image(seed.image)
                .with_rating(seed.rating, seed.reviews)
                .with_tag(seed.tag)
                .with_position(position as u32)
        })
        .collect()
}
