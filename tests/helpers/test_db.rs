use deskbot::database::Database;

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // Use file-based SQLite for tests (unique UUID per test for parallel execution)
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;
    seed_test_data(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            user_type TEXT NOT NULL CHECK(user_type IN ('agent', 'contact', 'system')),
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        "CREATE TABLE tickets (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('open', 'pending', 'resolved', 'closed')) DEFAULT 'open',
            contact_id TEXT NOT NULL,
            assigned_agent_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES users(id) ON DELETE RESTRICT,
            FOREIGN KEY (assigned_agent_id) REFERENCES users(id) ON DELETE SET NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create tickets table");

    sqlx::query(
        "CREATE TABLE messages (
            id TEXT PRIMARY KEY,
            ticket_id TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('incoming', 'outgoing')),
            content TEXT NOT NULL,
            author_id TEXT NOT NULL,
            is_internal INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (ticket_id) REFERENCES tickets(id) ON DELETE CASCADE,
            FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create messages table");

    sqlx::query(
        "CREATE TABLE faq_entries (
            id TEXT PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create faq_entries table");

    sqlx::query(
        "CREATE TABLE automation_rules (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            reason TEXT,
            enabled BOOLEAN NOT NULL DEFAULT TRUE,
            trigger_keyword TEXT NOT NULL,
            trigger_location TEXT NOT NULL CHECK(trigger_location IN ('title', 'description', 'message')),
            action TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create automation_rules table");

    sqlx::query(
        "CREATE TABLE rule_evaluation_logs (
            id TEXT PRIMARY KEY,
            rule_id TEXT NOT NULL,
            rule_name TEXT NOT NULL,
            ticket_id TEXT NOT NULL,
            location TEXT NOT NULL,
            outcome TEXT NOT NULL,
            error_message TEXT,
            evaluation_time_ms INTEGER NOT NULL,
            evaluated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create rule_evaluation_logs table");
}

async fn seed_test_data(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "INSERT INTO users (id, email, display_name, user_type, created_at) VALUES
        ('ai-assistant', 'ai-assistant@deskbot.local', 'AI Assistant', 'system', datetime('now')),
        ('contact-001', 'client@example.com', 'Test Client', 'contact', datetime('now')),
        ('agent-001', 'agent@example.com', 'Test Agent', 'agent', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed users");

    sqlx::query(
        "INSERT INTO faq_entries (id, question, answer, created_at) VALUES
        ('faq-001', 'Comment reinitialiser le VPN ?', 'Relancer le client puis se reconnecter.', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed FAQ entries");
}

pub async fn teardown_test_db(db: Database) {
    // Close the connection
    drop(db);
    // Note: Test database files will be cleaned up manually or by .gitignore
}
