// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::User;

const SEED: [(i64, &str, &str, &str); 8] = [
    (
        1,
        "Soham Newman",
        "soham.newman@example.com",
        "https://randomuser.me/api/portraits/men/86.jpg",
    ),
    (
        2,
        "Denise Hall",
        "deni.hall@abc.com",
        "https://randomuser.me/api/portraits/women/2.jpg",
    ),
    (
        3,
        "Tracy Bing",
        "tracy.bing@example.com",
        "https://randomuser.me/api/portraits/women/91.jpg",
    ),
    (
        4,
        "Letitia George",
        "letitia.george@example.com",
        "https://randomuser.me/api/portraits/women/81.jpg",
    ),
    (
        5,
        "Ken Alvarez",
        "ken.alvarez@example.com",
        "https://randomuser.me/api/portraits/men/54.jpg",
    ),
    (
        6,
        "Calvin Jones",
        "calvin.jones@abc.com",
        "https://randomuser.me/api/portraits/men/46.jpg",
    ),
    (
        7,
        "Bradley Wells",
        "bradley.wells@example.com",
        "https://randomuser.me/api/portraits/men/32.jpg",
    ),
    (
        8,
        "Brad Grant",
        "brad.grant@example.com",
        "https://randomuser.me/api/portraits/men/40.jpg",
    ),
];

/// Built-in roster used when no roster file is configured.
pub fn default_users() -> Vec<User> {
    SEED.iter()
        .map(|(id, name, email, avatar)| User::new(*id, *name, *email).with_avatar(*avatar))
        .collect()
}
