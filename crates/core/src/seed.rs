//! Built-in sample catalog.
//!
//! Reference tables for the four facet dimensions, community badges, three
//! members, and three sample gifts. The API boots from this unless seeding is turned
//! off.

use chrono::{TimeZone, Utc};

use crate::catalog::{
    Badge, Category, EntryStore, GiftEntry, Interest, Occasion, Recipient, ReferenceCatalog, User,
};
use crate::price::Price;
use crate::types::Timestamp;

fn date(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("seed dates are valid calendar dates")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn category(id: &str, name: &str, icon: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

fn occasion(id: &str, name: &str, icon: &str) -> Occasion {
    Occasion {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn recipient(id: &str, name: &str, icon: &str) -> Recipient {
    Recipient {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn interest(id: &str, name: &str, icon: &str) -> Interest {
    Interest {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn badge(id: &str, name: &str, description: &str, icon: &str, color: &str) -> Badge {
    Badge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

/// Profile counters for a seed member.
struct Stats {
    points: u32,
    submitted_gifts: u32,
    helpful_votes: u32,
}

fn user(
    id: &str,
    username: &str,
    email: &str,
    avatar: &str,
    joined: Timestamp,
    badges: &[&str],
    stats: Stats,
) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        avatar: Some(avatar.to_string()),
        join_date: joined,
        points: stats.points,
        badges: strings(badges),
        submitted_gifts: stats.submitted_gifts,
        helpful_votes: stats.helpful_votes,
    }
}

/// The facet reference tables and community members.
pub fn references() -> ReferenceCatalog {
    ReferenceCatalog {
        categories: vec![
            category("handmade", "Handmade", "🔨", "bg-amber-100 text-amber-800"),
            category("tech", "Technology", "📱", "bg-blue-100 text-blue-800"),
            category("home", "Home & Decor", "🏠", "bg-green-100 text-green-800"),
            category("fashion", "Fashion & Accessories", "👗", "bg-pink-100 text-pink-800"),
            category("books", "Books & Art", "📚", "bg-purple-100 text-purple-800"),
            category("food", "Food & Drink", "🍷", "bg-red-100 text-red-800"),
            category("beauty", "Personal Care", "💄", "bg-orange-100 text-orange-800"),
            category("sports", "Sports & Outdoors", "⚽", "bg-teal-100 text-teal-800"),
        ],
        occasions: vec![
            occasion("birthday", "Birthday", "🎂"),
            occasion("anniversary", "Anniversary", "💕"),
            occasion("wedding", "Wedding", "💍"),
            occasion("graduation", "Graduation", "🎓"),
            occasion("mothers-day", "Mother's Day", "🌸"),
            occasion("fathers-day", "Father's Day", "👔"),
            occasion("valentines", "Valentine's Day", "❤️"),
            occasion("christmas", "New Year", "🎄"),
            occasion("new-job", "New Job", "💼"),
            occasion("housewarming", "Housewarming", "🏡"),
        ],
        recipients: vec![
            recipient("mom", "Mom", "👩"),
            recipient("dad", "Dad", "👨"),
            recipient("partner", "Partner", "💑"),
            recipient("friend", "Friend", "👫"),
            recipient("colleague", "Colleague", "👥"),
            recipient("child", "Child", "👶"),
            recipient("teen", "Teen", "👦"),
            recipient("grandparent", "Grandparent", "👴"),
            recipient("teacher", "Teacher", "👩‍🏫"),
        ],
        interests: vec![
            interest("cooking", "Cooking", "👨‍🍳"),
            interest("reading", "Reading", "📖"),
            interest("gaming", "Gaming", "🎮"),
            interest("fitness", "Fitness", "💪"),
            interest("travel", "Travel", "✈️"),
            interest("music", "Music", "🎵"),
            interest("art", "Art", "🎨"),
            interest("gardening", "Gardening", "🌱"),
            interest("photography", "Photography", "📸"),
            interest("diy", "DIY", "🔧"),
        ],
        badges: vec![
            badge("1", "Gift Guru", "50+ helpful gift suggestions", "🎁", "text-yellow-600"),
            badge("2", "Community Helper", "100+ helpful votes received", "🤝", "text-blue-600"),
            badge("3", "Trendsetter", "Suggested 5 trending gifts", "🔥", "text-red-600"),
            badge("4", "Early Bird", "One of the first 1000 users", "🐦", "text-green-600"),
        ],
        users: vec![
            user(
                "1",
                "aysel_k",
                "aysel@example.com",
                "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150",
                date(2024, 1, 15),
                &["1", "2"],
                Stats {
                    points: 1250,
                    submitted_gifts: 23,
                    helpful_votes: 145,
                },
            ),
            user(
                "2",
                "mehmet_design",
                "mehmet@example.com",
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150",
                date(2024, 2, 20),
                &["3"],
                Stats {
                    points: 890,
                    submitted_gifts: 15,
                    helpful_votes: 67,
                },
            ),
            user(
                "3",
                "zeynep_gifts",
                "zeynep@example.com",
                "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150",
                date(2024, 3, 10),
                &["1", "2", "3"],
                Stats {
                    points: 2100,
                    submitted_gifts: 42,
                    helpful_votes: 234,
                },
            ),
        ],
    }
}

/// The three sample gifts, newest first.
pub fn gifts() -> Vec<GiftEntry> {
    vec![
        GiftEntry {
            id: "1".to_string(),
            title: "Personalised Handmade Ceramic Mug".to_string(),
            description: "A ceramic mug with a name on it, to remind someone of you with every \
                          morning coffee. Handmade from natural materials."
                .to_string(),
            image: "https://images.unsplash.com/photo-1514228742587-6b1558fcf93a?w=400".to_string(),
            price: Some(Price::new(89.0, "₺")),
            affiliate_link: "https://example.com/affiliate/ceramic-mug".to_string(),
            submitted_by: "1".to_string(),
            submitted_at: date(2024, 11, 15),
            upvotes: 47,
            downvotes: 3,
            comments: Vec::new(),
            tags: strings(&["personalised", "handmade", "ceramic", "coffee"]),
            category: "handmade".to_string(),
            occasions: strings(&["birthday", "mothers-day"]),
            recipients: strings(&["mom", "partner"]),
            interests: strings(&["cooking"]),
            verified: true,
            featured: true,
        },
        GiftEntry {
            id: "2".to_string(),
            title: "Smart Plant Care Sensor".to_string(),
            description: "For plant lovers: measures soil moisture, light and temperature and \
                          sends notifications to your phone."
                .to_string(),
            image: "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=400".to_string(),
            price: Some(Price::new(245.0, "₺")),
            affiliate_link: "https://example.com/affiliate/plant-sensor".to_string(),
            submitted_by: "2".to_string(),
            submitted_at: date(2024, 11, 12),
            upvotes: 32,
            downvotes: 1,
            comments: Vec::new(),
            tags: strings(&["smart", "plants", "technology", "garden"]),
            category: "tech".to_string(),
            occasions: strings(&["new-job", "housewarming"]),
            recipients: strings(&["friend", "colleague"]),
            interests: strings(&["gardening", "reading"]),
            verified: true,
            featured: false,
        },
        GiftEntry {
            id: "3".to_string(),
            title: "Minimal Wooden Photo Stand".to_string(),
            description: "A minimalist wooden stand for showing off your favourite prints. \
                          Ideal for phones and small frames."
                .to_string(),
            image: "https://images.unsplash.com/photo-1513475382585-d06e58bcb0e0?w=400".to_string(),
            price: Some(Price::new(65.0, "₺")),
            affiliate_link: "https://example.com/affiliate/photo-stand".to_string(),
            submitted_by: "3".to_string(),
            submitted_at: date(2024, 11, 10),
            upvotes: 28,
            downvotes: 2,
            comments: Vec::new(),
            tags: strings(&["wood", "minimal", "photo", "decor"]),
            category: "home".to_string(),
            occasions: strings(&["birthday", "housewarming"]),
            recipients: strings(&["child", "teen"]),
            interests: strings(&["photography", "art"]),
            verified: true,
            featured: false,
        },
    ]
}

/// A store holding the sample gifts.
pub fn sample_store() -> EntryStore {
    EntryStore::with_entries(references(), gifts())
}
