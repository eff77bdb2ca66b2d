//! Seed catalog loaded at start-up.

use jiff::Timestamp;

use crate::{
    database::Tables,
    domain::products::records::{ProductCategory, ProductRecord, ProductStatus, ProductUuid},
};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: u64,
    category: ProductCategory,
    stock: u32,
    image: &'static str,
    status: ProductStatus,
}

const CATALOG: [SeedProduct; 10] = [
    SeedProduct {
        name: "Brilliant Cut Diamond",
        description: "1.0 carat round brilliant, VS1 clarity, G colour.",
        price: 4_999_00,
        category: ProductCategory::Diamonds,
        stock: 5,
        image: "/images/products/brilliant-diamond.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Princess Cut Diamond",
        description: "0.75 carat princess cut with excellent symmetry.",
        price: 3_250_00,
        category: ProductCategory::Diamonds,
        stock: 3,
        image: "/images/products/princess-diamond.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Burmese Ruby",
        description: "Pigeon blood red oval ruby, 2.1 carats, unheated.",
        price: 7_800_00,
        category: ProductCategory::Rubies,
        stock: 2,
        image: "/images/products/burmese-ruby.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Star Ruby Cabochon",
        description: "Six-rayed star ruby cabochon with strong asterism.",
        price: 1_450_00,
        category: ProductCategory::Rubies,
        stock: 0,
        image: "/images/products/star-ruby.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Ceylon Blue Sapphire",
        description: "Cornflower blue cushion cut sapphire, 3 carats.",
        price: 5_600_00,
        category: ProductCategory::Sapphires,
        stock: 4,
        image: "/images/products/ceylon-sapphire.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Padparadscha Sapphire",
        description: "Rare pink-orange sapphire from Sri Lanka.",
        price: 9_200_00,
        category: ProductCategory::Sapphires,
        stock: 1,
        image: "/images/products/padparadscha.jpg",
        status: ProductStatus::Draft,
    },
    SeedProduct {
        name: "Colombian Emerald",
        description: "Vivid green emerald cut, minor oil, 1.8 carats.",
        price: 6_100_00,
        category: ProductCategory::Emeralds,
        stock: 3,
        image: "/images/products/colombian-emerald.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Akoya Pearl Strand",
        description: "18 inch strand of 7mm Akoya pearls with white gold clasp.",
        price: 899_00,
        category: ProductCategory::Pearls,
        stock: 10,
        image: "/images/products/akoya-strand.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Australian Black Opal",
        description: "Lightning Ridge black opal with a full colour play.",
        price: 2_300_00,
        category: ProductCategory::Opals,
        stock: 2,
        image: "/images/products/black-opal.jpg",
        status: ProductStatus::Active,
    },
    SeedProduct {
        name: "Tanzanite Pendant",
        description: "Trillion cut tanzanite set in a platinum pendant.",
        price: 1_150_00,
        category: ProductCategory::Other,
        stock: 6,
        image: "/images/products/tanzanite-pendant.jpg",
        status: ProductStatus::Inactive,
    },
];

/// Insert the demo catalog into `tables`, returning the number of products added.
pub fn seed_catalog(tables: &mut Tables, now: Timestamp) -> usize {
    for seed in &CATALOG {
        let record = ProductRecord {
            uuid: ProductUuid::new(),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: seed.price,
            category: seed.category,
            stock: seed.stock,
            image: seed.image.to_owned(),
            status: seed.status,
            created_at: now,
            updated_at: now,
        };

        tables.products.insert(record.uuid, record);
    }

    CATALOG.len()
}
