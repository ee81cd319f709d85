// Configuration file name
pub const CONFIG_FILENAME: &str = "pgtrail.yaml";

// Schema used when neither the audit table nor the changeset table is qualified
pub const DEFAULT_SCHEMA: &str = "public";

// Default audit table, shared by every tracked table in a schema
pub const DEFAULT_AUDIT_TABLE: &str = "logged_actions";

// Generated object names. Tooling that inspects the database depends on these,
// renaming any of them requires a migration of existing installations.
pub const ACTION_TYPE_NAME: &str = "action_type";
pub const DELETE_KEYS_FUNCTION: &str = "json_object_delete_keys";
pub const DELETE_VALUES_FUNCTION: &str = "json_object_delete_values";
pub const LOG_ACTION_FUNCTION: &str = "log_action";
pub const ROW_TRIGGER_NAME: &str = "log_action_row_trigger";
pub const STATEMENT_TRIGGER_NAME: &str = "log_action_stmt_trigger";

// Values of the action_type enum, in declaration order
pub const ACTION_TYPE_VALUES: [&str; 5] = ["INSERT", "SELECT", "UPDATE", "DELETE", "TRUNCATE"];

// Transaction-local setting read by log_action to link audit rows to a changeset
pub const CHANGESET_SETTING: &str = "audit.changeset_id";
