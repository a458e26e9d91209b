// tests/assessment_api_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use lms_backend::{
    config::Config, models::component::ActivityKind, routes, state::AppState, store::MemoryStore,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(store: Arc<MemoryStore>) -> String {
    let config = Config {
        database_url: "unused-in-tests".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState::new(store, config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Seeds a quiz with 3 questions of 4 options each (first option correct).
/// Returns (quiz id, question ids, option ids grouped per question).
fn seed_quiz(store: &MemoryStore) -> (i64, Vec<i64>, Vec<Vec<i64>>) {
    let course = store.add_course("Rust 101", 1);
    let module = store.add_module(course.id, "Module", true);
    let section = store.add_section(module.id, "Quizzes", ActivityKind::Quiz);
    let quiz = store.add_component(section.id, "Final quiz", ActivityKind::Quiz, None);

    let mut question_ids = Vec::new();
    let mut option_ids = Vec::new();
    for q in 0..3 {
        let question = store.add_question(quiz.id, &format!("Question {}", q));
        question_ids.push(question.id);
        let mut per_question = Vec::new();
        for o in 0..4 {
            let option = store.add_option(question.id, &format!("Option {}", o), o == 0);
            per_question.push(option.id);
        }
        option_ids.push(per_question);
    }
    (quiz.id, question_ids, option_ids)
}

#[tokio::test]
async fn paper_without_shuffling_preserves_creation_order() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, question_ids, option_ids) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/api/assessments/{}/paper?shuffle_questions=false&shuffle_options=false",
            address, quiz_id
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 3);

    let got: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(got, question_ids);

    for (question, expected) in body["questions"].as_array().unwrap().iter().zip(&option_ids) {
        let got: Vec<i64> = question["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["id"].as_i64().unwrap())
            .collect();
        assert_eq!(&got, expected);
    }
}

#[tokio::test]
async fn shuffled_paper_is_a_permutation_and_never_leaks_answers() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, question_ids, option_ids) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/assessments/{}/paper", address, quiz_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();

    let questions = body["questions"].as_array().unwrap();
    let got: HashSet<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    let expected: HashSet<i64> = question_ids.iter().copied().collect();
    assert_eq!(got, expected);

    for question in questions {
        let q_id = question["id"].as_i64().unwrap();
        let idx = question_ids.iter().position(|id| *id == q_id).unwrap();

        let got: HashSet<i64> = question["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["id"].as_i64().unwrap())
            .collect();
        let expected: HashSet<i64> = option_ids[idx].iter().copied().collect();
        assert_eq!(got, expected, "options must stay with their question");

        // Ground truth must never be serialized into the paper.
        for option in question["options"].as_array().unwrap() {
            assert!(option.get("is_correct").is_none());
        }
    }
}

#[tokio::test]
async fn unknown_assessment_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/assessments/4242/paper", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn full_attempt_flow_scores_and_stays_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, question_ids, option_ids) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    // 1. Start the attempt.
    let response = client
        .post(format!("{}/api/submissions", address))
        .json(&serde_json::json!({ "student_id": 42, "component_id": quiz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
    let submission: serde_json::Value = response.json().await.unwrap();
    let submission_id = submission["id"].as_i64().unwrap();
    assert_eq!(submission["state"], "not_started");

    // 2. Answer: correct, correct, wrong.
    let answers = serde_json::json!({
        "student_id": 42,
        "answers": [
            { "question_id": question_ids[0], "option_id": option_ids[0][0] },
            { "question_id": question_ids[1], "option_id": option_ids[1][0] },
            { "question_id": question_ids[2], "option_id": option_ids[2][1] },
        ]
    });
    let response = client
        .post(format!("{}/api/submissions/{}/answers", address, submission_id))
        .json(&answers)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let submitted: serde_json::Value = response.json().await.unwrap();
    assert_eq!(submitted["state"], "submitted");

    // 3. Score.
    let response = client
        .post(format!("{}/api/submissions/{}/score", address, submission_id))
        .json(&serde_json::json!({ "student_id": 42 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let scored: serde_json::Value = response.json().await.unwrap();
    assert_eq!(scored["score"], 2);
    assert_eq!(scored["status"], true);
    assert_eq!(scored["state"], "scored");

    // 4. Re-score with no new answers: identical result.
    let rescored: serde_json::Value = client
        .post(format!("{}/api/submissions/{}/score", address, submission_id))
        .json(&serde_json::json!({ "student_id": 42 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rescored["score"], 2);
}

#[tokio::test]
async fn duplicate_submission_returns_409() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, _, _) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({ "student_id": 42, "component_id": quiz_id });

    let first = client
        .post(format!("{}/api/submissions", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(format!("{}/api/submissions", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn resubmitting_answers_is_rejected_and_cannot_inflate_the_score() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, question_ids, option_ids) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let submission: serde_json::Value = client
        .post(format!("{}/api/submissions", address))
        .json(&serde_json::json!({ "student_id": 42, "component_id": quiz_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let submission_id = submission["id"].as_i64().unwrap();

    // One correct answer, submitted once.
    let answers = serde_json::json!({
        "student_id": 42,
        "answers": [
            { "question_id": question_ids[0], "option_id": option_ids[0][0] },
        ]
    });
    let first = client
        .post(format!("{}/api/submissions/{}/answers", address, submission_id))
        .json(&answers)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 200);

    // Replays of the same correct answer must bounce off the submitted record.
    for _ in 0..2 {
        let replay = client
            .post(format!("{}/api/submissions/{}/answers", address, submission_id))
            .json(&answers)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(replay.status().as_u16(), 409);
    }

    let scored: serde_json::Value = client
        .post(format!("{}/api/submissions/{}/score", address, submission_id))
        .json(&serde_json::json!({ "student_id": 42 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(scored["score"], 1);

    // A scored record refuses further answers too.
    let after_scoring = client
        .post(format!("{}/api/submissions/{}/answers", address, submission_id))
        .json(&answers)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(after_scoring.status().as_u16(), 409);
}

#[tokio::test]
async fn scoring_someone_elses_submission_returns_401() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, question_ids, option_ids) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let submission: serde_json::Value = client
        .post(format!("{}/api/submissions", address))
        .json(&serde_json::json!({ "student_id": 42, "component_id": quiz_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let submission_id = submission["id"].as_i64().unwrap();

    client
        .post(format!("{}/api/submissions/{}/answers", address, submission_id))
        .json(&serde_json::json!({
            "student_id": 42,
            "answers": [
                { "question_id": question_ids[0], "option_id": option_ids[0][0] },
            ]
        }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/submissions/{}/score", address, submission_id))
        .json(&serde_json::json!({ "student_id": 7 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn scoring_without_answers_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, _, _) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let submission: serde_json::Value = client
        .post(format!("{}/api/submissions", address))
        .json(&serde_json::json!({ "student_id": 42, "component_id": quiz_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let submission_id = submission["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/api/submissions/{}/score", address, submission_id))
        .json(&serde_json::json!({ "student_id": 42 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn empty_answer_set_returns_400() {
    let store = Arc::new(MemoryStore::new());
    let (quiz_id, _, _) = seed_quiz(&store);
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();

    let submission: serde_json::Value = client
        .post(format!("{}/api/submissions", address))
        .json(&serde_json::json!({ "student_id": 42, "component_id": quiz_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let submission_id = submission["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/api/submissions/{}/answers", address, submission_id))
        .json(&serde_json::json!({ "student_id": 42, "answers": [] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}
