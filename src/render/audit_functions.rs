//! PL/pgSQL and SQL bodies for the generated audit functions.
//!
//! These run inside PostgreSQL, not in this process. They are kept as fixed,
//! versioned templates; only object names are substituted in. Bump
//! [`TEMPLATE_VERSION`] whenever the text of a template changes.

use crate::constants::{
    ACTION_TYPE_NAME, CHANGESET_SETTING, DELETE_KEYS_FUNCTION, DELETE_VALUES_FUNCTION,
    LOG_ACTION_FUNCTION,
};
use crate::render::{escape_string, qualified_ident};

pub const TEMPLATE_VERSION: u32 = 2;

/// Argument signatures, used to address each function in DROP FUNCTION
pub const DELETE_KEYS_PARAMETERS: &str = "jsonb, text[]";
pub const DELETE_VALUES_PARAMETERS: &str = "jsonb, jsonb";
pub const LOG_ACTION_PARAMETERS: &str = "";

const DELETE_KEYS_TEMPLATE: &str = r#"CREATE OR REPLACE FUNCTION @FUNCTION@(json_object jsonb, keys_to_delete text[])
RETURNS jsonb
LANGUAGE sql
IMMUTABLE
STRICT
AS $function$
    SELECT json_object - keys_to_delete
$function$;"#;

const DELETE_VALUES_TEMPLATE: &str = r#"CREATE OR REPLACE FUNCTION @FUNCTION@(json_object jsonb, values_to_delete jsonb)
RETURNS jsonb
LANGUAGE sql
IMMUTABLE
STRICT
AS $function$
    SELECT COALESCE(jsonb_object_agg(entry.key, entry.value), '{}'::jsonb)
    FROM jsonb_each(json_object) AS entry
    WHERE (values_to_delete -> entry.key) IS DISTINCT FROM entry.value
$function$;"#;

const LOG_ACTION_TEMPLATE: &str = r#"CREATE OR REPLACE FUNCTION @FUNCTION@()
RETURNS trigger
LANGUAGE plpgsql
SECURITY DEFINER
SET search_path = pg_catalog, pg_temp
AS $function$
-- pgtrail log_action template v@VERSION@
DECLARE
    audit_row @AUDIT_TABLE@%ROWTYPE;
    excluded_cols text[] := ARRAY[]::text[];
    old_data jsonb;
BEGIN
    IF TG_WHEN <> 'AFTER' THEN
        RAISE EXCEPTION 'log_action() may only run as an AFTER trigger, not %', TG_WHEN;
    END IF;

    audit_row.schema_name := TG_TABLE_SCHEMA::text;
    audit_row.table_name := TG_TABLE_NAME::text;
    audit_row.relid := TG_RELID;
    audit_row.action_tstamp_tx := transaction_timestamp();
    audit_row.action_tstamp_stm := statement_timestamp();
    audit_row.action_tstamp_clk := clock_timestamp();
    audit_row.transaction_id := txid_current();
    audit_row.action := TG_OP::@ACTION_TYPE@;
    audit_row.statement_only := false;

    -- TG_ARGV[0]: capture the client query (default true)
    IF TG_ARGV[0]::boolean IS DISTINCT FROM false THEN
        audit_row.client_query := current_query();
    END IF;

    -- TG_ARGV[1]: columns left out of row_data and changed_fields
    IF TG_ARGV[1] IS NOT NULL THEN
        excluded_cols := TG_ARGV[1]::text[];
    END IF;

    -- TG_ARGV[2]: capture session and client details (default true)
    IF TG_ARGV[2]::boolean IS DISTINCT FROM false THEN
        audit_row.session_user_name := session_user::text;
        audit_row.application_name := current_setting('application_name');
        audit_row.client_addr := inet_client_addr();
        audit_row.client_port := inet_client_port();
    END IF;
@CHANGESET@
    IF TG_LEVEL = 'ROW' AND TG_OP = 'UPDATE' THEN
        old_data := to_jsonb(OLD);
        audit_row.row_data := @DELETE_KEYS@(old_data, excluded_cols);
        audit_row.changed_fields := @DELETE_KEYS@(
            @DELETE_VALUES@(to_jsonb(NEW), old_data),
            excluded_cols
        );
        IF audit_row.changed_fields = '{}'::jsonb THEN
            RETURN NULL;
        END IF;
    ELSIF TG_LEVEL = 'ROW' AND TG_OP = 'DELETE' THEN
        audit_row.row_data := @DELETE_KEYS@(to_jsonb(OLD), excluded_cols);
    ELSIF TG_LEVEL = 'ROW' AND TG_OP = 'INSERT' THEN
        audit_row.row_data := @DELETE_KEYS@(to_jsonb(NEW), excluded_cols);
    ELSIF TG_LEVEL = 'STATEMENT' AND TG_OP IN ('INSERT', 'UPDATE', 'DELETE', 'TRUNCATE') THEN
        audit_row.statement_only := true;
    ELSE
        RAISE EXCEPTION 'log_action() added as trigger for unhandled case: %, %', TG_OP, TG_LEVEL;
    END IF;

    audit_row.id := nextval(pg_get_serial_sequence(@AUDIT_TABLE_LITERAL@, 'id'));
    INSERT INTO @AUDIT_TABLE@ VALUES (audit_row.*);
    RETURN NULL;
END;
$function$;"#;

/// `json_object_delete_keys(jsonb, text[])`: the object without the listed keys
pub fn render_delete_keys_function(schema: &str) -> String {
    DELETE_KEYS_TEMPLATE.replace("@FUNCTION@", &qualified_ident(schema, DELETE_KEYS_FUNCTION))
}

/// `json_object_delete_values(jsonb, jsonb)`: the entries of the first object
/// whose value differs from (or is missing in) the second
pub fn render_delete_values_function(schema: &str) -> String {
    DELETE_VALUES_TEMPLATE.replace(
        "@FUNCTION@",
        &qualified_ident(schema, DELETE_VALUES_FUNCTION),
    )
}

/// The trigger function writing into `schema.audit_table`.
///
/// With `changeset_tracking` the row is linked to the changeset named by the
/// transaction-local `audit.changeset_id` setting; the audit table then has a
/// `changeset_id` column.
pub fn render_log_action_function(
    schema: &str,
    audit_table: &str,
    changeset_tracking: bool,
) -> String {
    let audit_table_ident = qualified_ident(schema, audit_table);
    let changeset = if changeset_tracking {
        format!(
            "\n    audit_row.changeset_id := NULLIF(current_setting({}, true), '')::bigint;\n",
            escape_string(CHANGESET_SETTING)
        )
    } else {
        String::new()
    };

    LOG_ACTION_TEMPLATE
        .replace("@FUNCTION@", &qualified_ident(schema, LOG_ACTION_FUNCTION))
        .replace("@VERSION@", &TEMPLATE_VERSION.to_string())
        .replace("@AUDIT_TABLE_LITERAL@", &escape_string(&audit_table_ident))
        .replace("@AUDIT_TABLE@", &audit_table_ident)
        .replace("@ACTION_TYPE@", &qualified_ident(schema, ACTION_TYPE_NAME))
        .replace("@DELETE_KEYS@", &qualified_ident(schema, DELETE_KEYS_FUNCTION))
        .replace("@DELETE_VALUES@", &qualified_ident(schema, DELETE_VALUES_FUNCTION))
        .replace("@CHANGESET@", &changeset)
}
