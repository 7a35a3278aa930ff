use nanoid::nanoid;

pub const ID_LENGTH: usize = 6;

pub const ALPHABET: [char; 62] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9',
];

/// Generate a random 6-character alphanumeric token.
///
/// Used for link aliases, user ids and visitor ids. Each call is an
/// independent draw; nothing here guarantees the token is unused.
pub fn generate_id() -> String {
    nanoid!(ID_LENGTH, &ALPHABET)
}

/// Keep drawing tokens until `is_taken` accepts one.
pub fn generate_unique_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = generate_id();
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}
