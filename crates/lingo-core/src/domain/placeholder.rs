//! Locally synthesized placeholder content
//!
//! When the remote content source cannot be reached the downloader fills the
//! partition with a small, schema-conforming set of records so offline mode
//! still has something usable. Every generated record carries the
//! `synthetic` marker.

use serde_json::json;

use super::partition::Partition;
use super::record::Record;

/// Number of placeholder lessons
pub const LESSON_COUNT: usize = 10;
/// Number of placeholder vocabulary entries
pub const VOCABULARY_COUNT: usize = 15;
/// Number of placeholder activities
pub const ACTIVITY_COUNT: usize = 8;
/// Number of placeholder progress entries
pub const PROGRESS_COUNT: usize = 5;

/// (telugu, transliteration, english, category)
const VOCABULARY: [(&str, &str, &str, &str); VOCABULARY_COUNT] = [
    ("నమస్కారం", "namaskāram", "hello", "greetings"),
    ("ధన్యవాదాలు", "dhanyavādālu", "thank you", "greetings"),
    ("అవును", "avunu", "yes", "basics"),
    ("కాదు", "kādu", "no", "basics"),
    ("నీరు", "nīru", "water", "food"),
    ("అన్నం", "annaṁ", "rice", "food"),
    ("పాలు", "pālu", "milk", "food"),
    ("ఇల్లు", "illu", "house", "places"),
    ("బడి", "baḍi", "school", "places"),
    ("అమ్మ", "amma", "mother", "family"),
    ("నాన్న", "nānna", "father", "family"),
    ("ఒకటి", "okaṭi", "one", "numbers"),
    ("రెండు", "reṇḍu", "two", "numbers"),
    ("మూడు", "mūḍu", "three", "numbers"),
    ("పుస్తకం", "pustakaṁ", "book", "objects"),
];

const LESSON_TOPICS: [&str; LESSON_COUNT] = [
    "Greetings",
    "The Telugu Alphabet: Vowels",
    "The Telugu Alphabet: Consonants",
    "Numbers One to Ten",
    "Family Members",
    "Food and Drink",
    "Around the House",
    "At School",
    "Asking Questions",
    "Everyday Conversations",
];

const ACTIVITY_TYPES: [&str; 5] = ["flashcard", "quiz", "reading", "writing", "roleplay"];

const DIFFICULTIES: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// Generates placeholder records for a partition
///
/// `userSettings` has no placeholder content: settings are user-owned and
/// never downloaded.
pub fn generate(partition: Partition) -> Vec<Record> {
    let mut records = match partition {
        Partition::Lessons => lessons(),
        Partition::Vocabulary => vocabulary(),
        Partition::Activities => activities(),
        Partition::Progress => progress(),
        Partition::UserSettings => Vec::new(),
    };
    for record in &mut records {
        record.mark_synthetic();
    }
    records
}

fn into_record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => Record::new(map),
        _ => Record::default(),
    }
}

fn lessons() -> Vec<Record> {
    LESSON_TOPICS
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let chapter = i / 3 + 1;
            into_record(json!({
                "id": format!("placeholder-lesson-{}", i + 1),
                "title": topic,
                "content": format!(
                    "Offline lesson on {}. Connect to the internet to load the full lesson.",
                    topic.to_lowercase()
                ),
                "chapter": chapter,
                "difficulty": DIFFICULTIES[(chapter - 1).min(DIFFICULTIES.len() - 1)],
            }))
        })
        .collect()
}

fn vocabulary() -> Vec<Record> {
    VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, (telugu, transliteration, english, category))| {
            into_record(json!({
                "id": format!("placeholder-vocab-{}", i + 1),
                "telugu": telugu,
                "transliteration": transliteration,
                "english": english,
                "category": category,
            }))
        })
        .collect()
}

fn activities() -> Vec<Record> {
    (0..ACTIVITY_COUNT)
        .map(|i| {
            let kind = ACTIVITY_TYPES[i % ACTIVITY_TYPES.len()];
            let questions: Vec<serde_json::Value> = VOCABULARY
                .iter()
                .skip(i)
                .take(3)
                .enumerate()
                .map(|(q, (telugu, _, english, _))| {
                    json!({
                        "id": format!("placeholder-activity-{}-q{}", i + 1, q + 1),
                        "prompt": format!("What does '{}' mean?", telugu),
                        "answer": english,
                    })
                })
                .collect();
            into_record(json!({
                "id": format!("placeholder-activity-{}", i + 1),
                "type": kind,
                "title": format!("Practice {} ({})", i + 1, kind),
                "questions": questions,
            }))
        })
        .collect()
}

fn progress() -> Vec<Record> {
    (0..PROGRESS_COUNT)
        .map(|i| {
            into_record(json!({
                "id": format!("placeholder-progress-{}", i + 1),
                "lessonId": format!("placeholder-lesson-{}", i + 1),
                "completed": false,
                "score": 0,
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_counts_within_bounds() {
        for partition in Partition::DOWNLOADABLE {
            let records = generate(partition);
            assert!(
                (5..=15).contains(&records.len()),
                "{partition} produced {} records",
                records.len()
            );
        }
    }

    #[test]
    fn test_vocabulary_schema() {
        for record in generate(Partition::Vocabulary) {
            assert!(record.get("telugu").and_then(|v| v.as_str()).is_some());
            assert!(record.get("english").and_then(|v| v.as_str()).is_some());
            assert!(record.get("category").and_then(|v| v.as_str()).is_some());
        }
    }

    #[test]
    fn test_lesson_schema() {
        for record in generate(Partition::Lessons) {
            for field in ["title", "content", "chapter", "difficulty"] {
                assert!(record.get(field).is_some(), "lesson missing {field}");
            }
        }
    }

    #[test]
    fn test_activity_schema() {
        for record in generate(Partition::Activities) {
            assert!(record.get("type").is_some());
            let questions = record.get("questions").and_then(|v| v.as_array()).unwrap();
            assert!(!questions.is_empty());
        }
    }

    #[test]
    fn test_progress_schema() {
        for record in generate(Partition::Progress) {
            assert_eq!(record.get("completed"), Some(&json!(false)));
            assert_eq!(record.get("score"), Some(&json!(0)));
        }
    }

    #[test]
    fn test_all_marked_synthetic_with_unique_ids() {
        for partition in Partition::DOWNLOADABLE {
            let records = generate(partition);
            let ids: HashSet<_> = records
                .iter()
                .map(|r| r.identifier(partition).unwrap())
                .collect();
            assert_eq!(ids.len(), records.len());
            assert!(records.iter().all(Record::is_synthetic));
        }
    }

    #[test]
    fn test_no_placeholder_settings() {
        assert!(generate(Partition::UserSettings).is_empty());
    }
}
