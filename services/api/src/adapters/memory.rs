//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `TriviaRepository` port. It backs the
//! integration tests and lets the service run without a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use trivia_core::domain::{Category, NewQuestion, Question};
use trivia_core::ports::{PortError, PortResult, TriviaRepository};

/// The categories seeded by the initial migration, in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// The questions seeded by the initial migration, in id order, as
/// `(question, answer, difficulty, category)`.
pub const SEED_QUESTIONS: [(&str, &str, i32, i64); 19] = [
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2, 4),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 1, 4),
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 4, 5),
    ("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 4, 5),
    ("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 3, 5),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3, 6),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 4, 6),
    ("Who invented Peanut Butter?", "George Washington Carver", 2, 4),
    ("What is the largest lake in Africa?", "Lake Victoria", 2, 3),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 2, 3),
    ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 1, 2),
    ("La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 4, 2),
    ("Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    ("What is the heaviest organ in the human body?", "The Liver", 4, 1),
    ("Who discovered penicillin?", "Alexander Fleming", 3, 1),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 4, 1),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

/// `DEFAULT_CATEGORIES` with the ids the migration assigns them.
pub fn seed_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_string(),
        })
        .collect()
}

/// `SEED_QUESTIONS` with the ids the migration assigns them.
pub fn seed_questions() -> Vec<Question> {
    SEED_QUESTIONS
        .iter()
        .zip(1..)
        .map(|(&(question, answer, difficulty, category), id)| Question {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            difficulty,
            category,
        })
        .collect()
}

struct Store {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    /// `None` once the id space is used up.
    next_question_id: Option<i64>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            questions: BTreeMap::new(),
            next_question_id: Some(1),
        }
    }
}

/// A `TriviaRepository` holding everything in memory.
///
/// Question ids are never reused, and inserts naming an unknown category fail the
/// way a foreign key would.
#[derive(Default)]
pub struct InMemoryDb {
    store: RwLock<Store>,
}

impl InMemoryDb {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_question_id = questions
            .iter()
            .map(|q| q.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        let store = Store {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            next_question_id,
        };
        Self {
            store: RwLock::new(store),
        }
    }

    /// A store holding the default categories and no questions.
    pub fn with_default_categories() -> Self {
        Self::new(seed_categories(), Vec::new())
    }

    /// A store holding the same rows the migrations seed into PostgreSQL.
    pub fn seeded() -> Self {
        Self::new(seed_categories(), seed_questions())
    }
}

#[async_trait]
impl TriviaRepository for InMemoryDb {
    async fn list_categories(&self) -> PortResult<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.values().cloned().collect())
    }

    async fn get_category(&self, category_id: i64) -> PortResult<Category> {
        let store = self.store.read().await;
        store
            .categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Category {} not found", category_id)))
    }

    async fn list_questions(&self) -> PortResult<Vec<Question>> {
        let store = self.store.read().await;
        Ok(store.questions.values().cloned().collect())
    }

    async fn list_questions_by_category(&self, category_id: i64) -> PortResult<Vec<Question>> {
        let store = self.store.read().await;
        Ok(store
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> PortResult<Vec<Question>> {
        let needle = term.to_lowercase();
        let store = self.store.read().await;
        Ok(store
            .questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_question(&self, question_id: i64) -> PortResult<Question> {
        let store = self.store.read().await;
        store
            .questions
            .get(&question_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Question {} not found", question_id)))
    }

    async fn insert_question(&self, question: NewQuestion) -> PortResult<Question> {
        let mut store = self.store.write().await;
        if !store.categories.contains_key(&question.category) {
            return Err(PortError::Unexpected(format!(
                "Category {} does not exist",
                question.category
            )));
        }

        let id = store
            .next_question_id
            .ok_or_else(|| PortError::Unexpected("Question ids are exhausted".to_string()))?;
        store.next_question_id = id.checked_add(1);
        let question = question.into_question(id);
        store.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, question_id: i64) -> PortResult<()> {
        let mut store = self.store.write().await;
        store
            .questions
            .remove(&question_id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(format!("Question {} not found", question_id)))
    }
}
