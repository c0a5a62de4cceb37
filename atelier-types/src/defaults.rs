//! Built-in content shown when neither the backend nor the local mirror has
//! anything for a collection.

use crate::hours::{DayHours, Hours};
use crate::ids::RecordId;
use crate::records::{Artwork, CafeItem, Category, Event};

pub fn default_events() -> Vec<Event> {
    vec![
        Event {
            id: RecordId::from("1"),
            title: "New Exhibition Opening".to_string(),
            date: "2025-05-15".to_string(),
            time: "19:00 - 22:00".to_string(),
            description: "Join us for the opening night of our new exhibition featuring local artists."
                .to_string(),
            image: "/placeholder.svg?height=400&width=600&text=Exhibition".to_string(),
            kind: None,
            featured: false,
        },
        Event {
            id: RecordId::from("2"),
            title: "Watercolor Workshop".to_string(),
            date: "2025-05-22".to_string(),
            time: "14:00 - 17:00".to_string(),
            description: "Learn watercolor techniques from professional artists.".to_string(),
            image: "/placeholder.svg?height=400&width=600&text=Workshop".to_string(),
            kind: None,
            featured: false,
        },
    ]
}

pub fn default_artworks() -> Vec<Artwork> {
    vec![
        Artwork {
            id: RecordId::from("1"),
            title: "Desert Sunrise".to_string(),
            artist: "Ahmed Ali".to_string(),
            medium: None,
            description: "A beautiful depiction of a desert sunrise with vibrant colors.".to_string(),
            image: "/placeholder.svg?height=600&width=800&text=Artwork 1".to_string(),
            featured: true,
        },
        Artwork {
            id: RecordId::from("2"),
            title: "Urban Life".to_string(),
            artist: "Sara Johnson".to_string(),
            medium: None,
            description: "A portrayal of modern urban life and its complexities.".to_string(),
            image: "/placeholder.svg?height=600&width=800&text=Artwork 2".to_string(),
            featured: true,
        },
    ]
}

pub fn default_cafe_items() -> Vec<CafeItem> {
    vec![
        CafeItem {
            id: RecordId::from("1"),
            name: "Specialty Coffee".to_string(),
            description: "Expertly crafted espresso drinks made with locally roasted beans."
                .to_string(),
            price: 15.0,
            category: Category::Drink,
            image: None,
        },
        CafeItem {
            id: RecordId::from("2"),
            name: "Artisanal Pastries".to_string(),
            description: "Freshly baked goods made in-house daily using traditional recipes."
                .to_string(),
            price: 20.0,
            category: Category::Food,
            image: None,
        },
    ]
}

pub fn default_hours() -> Hours {
    Hours {
        sunday: DayHours::open("10:00 AM", "4:00 PM"),
        monday: DayHours::open("9:00 AM", "5:00 PM"),
        tuesday: DayHours::open("9:00 AM", "5:00 PM"),
        wednesday: DayHours::open("9:00 AM", "5:00 PM"),
        thursday: DayHours::open("9:00 AM", "5:00 PM"),
        friday: DayHours::open("9:00 AM", "8:00 PM"),
        saturday: DayHours::open("10:00 AM", "6:00 PM"),
    }
}
