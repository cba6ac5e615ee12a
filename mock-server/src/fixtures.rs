//! Fixed seed data served by the mock server.
//!
//! Ten users with nested address and company records, and one hundred posts
//! split evenly across them (ids 1..=100, `userId` 1..=10). The data never
//! changes at runtime.

use serde::{Deserialize, Serialize};

pub const USER_COUNT: u32 = 10;
pub const POSTS_PER_USER: u32 = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

const NAMES: [(&str, &str); USER_COUNT as usize] = [
    ("Leanne Graham", "Bret"),
    ("Ervin Howell", "Antonette"),
    ("Clementine Bauch", "Samantha"),
    ("Patricia Lebsack", "Karianne"),
    ("Chelsey Dietrich", "Kamren"),
    ("Dennis Schulist", "Leopoldo_Corkery"),
    ("Kurtis Weissnat", "Elwyn.Skiles"),
    ("Nicholas Runolfsdottir V", "Maxime_Nienow"),
    ("Glenna Reichert", "Delphine"),
    ("Clementina DuBuque", "Moriah.Stanton"),
];

const CITIES: [&str; 5] = ["Gwenborough", "Wisokyburgh", "McKenziehaven", "South Elvis", "Roscoeview"];

/// Seed data shared read-only by every request handler.
#[derive(Debug)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

impl Fixtures {
    pub fn seed() -> Self {
        Self {
            users: (1..=USER_COUNT).map(user).collect(),
            posts: (1..=USER_COUNT * POSTS_PER_USER).map(post).collect(),
        }
    }

    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn post(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}

fn user(id: u32) -> User {
    let (name, username) = NAMES[(id - 1) as usize];
    let city = CITIES[(id as usize - 1) % CITIES.len()];
    User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: format!("{}@example.org", username.to_lowercase()),
        address: Address {
            street: format!("{} Kulas Light", 100 + id),
            suite: format!("Apt. {}", 500 + id * 7),
            city: city.to_string(),
            zipcode: format!("{:05}-{:04}", 92998 - id * 11, 3874 + id),
            geo: Geo {
                lat: format!("-{}.{:04}", 30 + id, 3159 + id),
                lng: format!("{}.{:04}", 80 + id, 1496 + id),
            },
        },
        phone: format!("1-770-736-{:04}", 8031 + id),
        website: format!("{}.org", username.to_lowercase()),
        company: Company {
            name: format!("{name} Group"),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

fn post(id: u32) -> Post {
    Post {
        user_id: (id - 1) / POSTS_PER_USER + 1,
        id,
        title: format!("post {id} title"),
        body: format!("body of post {id}\nwritten for fixture data"),
    }
}
