mod common;

use common::spawn_server;
use serde_json::{json, Value};

#[tokio::test]
async fn task_routes_require_a_bearer_token() {
    let srv = spawn_server().await;
    for res in [
        srv.client.get(srv.url("/tasks")).send().await.unwrap(),
        srv.client
            .post(srv.url("/tasks"))
            .json(&json!({ "title": "nope" }))
            .send()
            .await
            .unwrap(),
        srv.client
            .get(srv.url("/tasks"))
            .bearer_auth("v1.bogus.token")
            .send()
            .await
            .unwrap(),
    ] {
        assert_eq!(res.status(), 401);
    }
}

#[tokio::test]
async fn create_applies_defaults_and_resolves_creator() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;
    let task = srv.create_task(&token, json!({ "title": "  Ship the release  " })).await;

    assert_eq!(task["title"], "Ship the release");
    assert_eq!(task["status"], "Todo");
    assert_eq!(task["priority"], "Medium");
    assert_eq!(task["createdBy"]["username"], "ada");
    assert_eq!(task["assignees"], json!([]));
}

#[tokio::test]
async fn create_without_title_fails_validation() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;
    let res = srv
        .client
        .post(srv.url("/tasks"))
        .bearer_auth(&token)
        .json(&json!({ "description": "no title here" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn assignment_notifies_everyone_except_the_actor() {
    let srv = spawn_server().await;
    let ada = srv.register("ada", "ada@example.com", "hunter22").await;
    let bob = srv.register("bob", "bob@example.com", "hunter22").await;
    srv.register("cat", "cat@example.com", "hunter22").await;

    let (_, ada_profile) = srv.get_json(&ada, "/users").await;
    let ids: Value = ada_profile;
    let id_of = |name: &str| {
        ids.as_array()
            .unwrap()
            .iter()
            .find(|u| u["username"] == name)
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string()
    };
    let ada_id = id_of("ada");
    let bob_id = id_of("bob");
    let cat_id = id_of("cat");

    srv.create_task(
        &ada,
        json!({ "title": "Crewed task", "assignees": [ada_id, bob_id, cat_id] }),
    )
    .await;

    // The creator assigned themselves; only the other two hear about it.
    let (status, mine) = srv.get_json(&ada, "/notifications").await;
    assert_eq!(status, 200);
    assert_eq!(mine.as_array().unwrap().len(), 0);

    let (_, bobs) = srv.get_json(&bob, "/notifications").await;
    let bobs = bobs.as_array().unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(
        bobs[0]["message"],
        "You have been assigned to task \"Crewed task\""
    );
    assert_eq!(bobs[0]["isRead"], false);
}

#[tokio::test]
async fn update_rights_are_creator_assignee_or_admin() {
    let srv = spawn_server().await;
    let ada = srv.register("ada", "ada@example.com", "hunter22").await;
    let bob = srv.register("bob", "bob@example.com", "hunter22").await;

    let task = srv.create_task(&ada, json!({ "title": "Locked down" })).await;
    let id = task["id"].as_str().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&bob)
        .json(&json!({ "status": "Done" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Not authorized to update this task");

    let res = srv
        .client
        .put(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&ada)
        .json(&json!({ "status": "Done" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "Done");
}

#[tokio::test]
async fn assignees_may_update_but_not_delete() {
    let srv = spawn_server().await;
    let ada = srv.register("ada", "ada@example.com", "hunter22").await;
    let bob = srv.register("bob", "bob@example.com", "hunter22").await;
    let (_, users) = srv.get_json(&ada, "/users").await;
    let bob_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "bob")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let task = srv
        .create_task(&ada, json!({ "title": "Shared", "assignees": [bob_id] }))
        .await;
    let id = task["id"].as_str().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&bob)
        .json(&json!({ "priority": "High" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = srv
        .client
        .delete(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Not authorized to delete this task");
}

#[tokio::test]
async fn soft_delete_hides_the_task_but_keeps_its_history() {
    let srv = spawn_server().await;
    let ada = srv.register("ada", "ada@example.com", "hunter22").await;
    let task = srv.create_task(&ada, json!({ "title": "Doomed" })).await;
    let id = task["id"].as_str().unwrap();

    let res = srv
        .client
        .delete(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Task removed (soft delete)");

    let (status, _) = srv.get_json(&ada, &format!("/tasks/{id}")).await;
    assert_eq!(status, 404);
    let (_, page) = srv.get_json(&ada, "/tasks").await;
    assert_eq!(page["totalTasks"], 0);

    // Activity of the tombstoned task stays readable, deletion included.
    let (status, logs) = srv.get_json(&ada, &format!("/tasks/{id}/logs")).await;
    assert_eq!(status, 200);
    let actions: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["DELETED_TASK", "CREATED_TASK"]);
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;

    for i in 0..12 {
        let status = if i % 2 == 0 { "Todo" } else { "Done" };
        srv.create_task(
            &token,
            json!({ "title": format!("Task {i}"), "status": status, "tags": ["batch"] }),
        )
        .await;
    }

    let (_, page) = srv.get_json(&token, "/tasks").await;
    assert_eq!(page["totalTasks"], 12);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["currentPage"], 1);
    assert_eq!(page["tasks"].as_array().unwrap().len(), 10);

    let (_, page2) = srv.get_json(&token, "/tasks?page=2").await;
    assert_eq!(page2["tasks"].as_array().unwrap().len(), 2);

    let (_, done) = srv.get_json(&token, "/tasks?status=Done").await;
    assert_eq!(done["totalTasks"], 6);

    let (_, searched) = srv.get_json(&token, "/tasks?search=task%201&limit=100").await;
    // "Task 1", "Task 10", "Task 11".
    assert_eq!(searched["totalTasks"], 3);

    let (status, _) = srv.get_json(&token, "/tasks?status=Archived").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn newest_tasks_come_first() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;
    srv.create_task(&token, json!({ "title": "first" })).await;
    srv.create_task(&token, json!({ "title": "second" })).await;

    let (_, page) = srv.get_json(&token, "/tasks").await;
    let titles: Vec<&str> = page["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn patch_rejects_protected_fields() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;
    let task = srv.create_task(&token, json!({ "title": "Guarded" })).await;
    let id = task["id"].as_str().unwrap();

    let res = srv
        .client
        .put(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "isDeleted": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn full_lifecycle_create_get_update_list() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;

    let created = srv
        .create_task(
            &token,
            json!({
                "title": "Release prep",
                "priority": "High",
                "tags": ["release"],
                "dueDate": "2024-06-01"
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();
    srv.create_task(&token, json!({ "title": "Unrelated chore" })).await;

    let (status, fetched) = srv.get_json(&token, &format!("/tasks/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["status"], "Todo");
    assert_eq!(fetched["priority"], "High");
    assert_eq!(fetched["createdBy"]["username"], "ada");

    let res = srv
        .client
        .put(srv.url(&format!("/tasks/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "status": "Done" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let (_, done) = srv.get_json(&token, "/tasks?status=Done").await;
    assert_eq!(done["totalTasks"], 1);
    assert_eq!(done["tasks"][0]["id"], id);

    let (_, tagged) = srv.get_json(&token, "/tasks?tags=release").await;
    assert_eq!(tagged["totalTasks"], 1);
    let (_, due) = srv.get_json(&token, "/tasks?dueDate=2024-06-01").await;
    assert_eq!(due["totalTasks"], 1);
    assert_eq!(due["tasks"][0]["id"], id);
    let (_, off_day) = srv.get_json(&token, "/tasks?dueDate=2024-06-02").await;
    assert_eq!(off_day["totalTasks"], 0);
}

#[tokio::test]
async fn export_produces_csv_with_usernames() {
    let srv = spawn_server().await;
    let token = srv.register("ada", "ada@example.com", "hunter22").await;
    srv.create_task(&token, json!({ "title": "Plain row" })).await;
    srv.create_task(&token, json!({ "title": "Comma, quoted" })).await;

    let res = srv
        .client
        .get(srv.url("/tasks/export"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let body = res.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,title,status,priority,dueDate,tags,assignees,createdBy,createdAt"
    );
    assert!(body.contains("\"Comma, quoted\""));
    assert!(body.contains(",ada,"));
}
