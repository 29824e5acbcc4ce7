//! Create-table migration: column plan, block splice, and the fresh stub.
//!
//! The generator never rewrites a whole migration. It locates the
//! `Schema::create(... function (Blueprint $table) { ... }` block, replaces
//! that byte range, and leaves every other byte of the file alone.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use scaf_core::naming;
use scaf_core::schema::SchemaDescriptor;

use crate::php;

static CREATE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Schema::create\(.*?function \(Blueprint \$table\) \{.*?\}")
        .expect("create-block pattern is valid")
});

const COLUMN_INDENT: &str = "            ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    pub table: String,
    /// Column statements in declaration order, without indentation.
    pub columns: Vec<String>,
    /// Foreign-key constraints, emitted after every column.
    pub constraints: Vec<String>,
}

#[must_use]
pub fn plan(descriptor: &SchemaDescriptor) -> MigrationPlan {
    let mut columns = Vec::with_capacity(descriptor.migration_columns().len());
    let mut constraints = Vec::new();

    for column in descriptor.migration_columns() {
        let nullable = if column.nullable { "->nullable()" } else { "" };
        let name = php::quote(&column.name);
        match &column.foreign_key {
            Some(fk) => {
                columns.push(format!("$table->foreignId({name}){nullable};"));
                constraints.push(format!(
                    "$table->foreign({name})->references({})->on({})->onDelete('cascade');",
                    php::quote(&fk.reference_column),
                    php::quote(&fk.reference_table),
                ));
            }
            None => columns.push(format!(
                "$table->{}({name}){nullable};",
                column.sql_type.as_str()
            )),
        }
    }

    MigrationPlan {
        table: descriptor.table_name(),
        columns,
        constraints,
    }
}

/// Replacement for the create-table block.
#[must_use]
pub fn render_block(plan: &MigrationPlan) -> String {
    let mut block = format!(
        "Schema::create({}, function (Blueprint $table) {{\n{COLUMN_INDENT}$table->id();\n",
        php::quote(&plan.table)
    );
    for line in plan.columns.iter().chain(&plan.constraints) {
        block.push_str(COLUMN_INDENT);
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(COLUMN_INDENT);
    block.push_str("$table->timestamps();\n        }");
    block
}

/// Byte range of the first create-table block in `content`.
#[must_use]
pub fn locate(content: &str) -> Option<Range<usize>> {
    CREATE_BLOCK.find(content).map(|m| m.range())
}

/// Replace the first create-table block. `None` when there is no block.
#[must_use]
pub fn splice(content: &str, plan: &MigrationPlan) -> Option<String> {
    let range = locate(content)?;
    let mut out = String::with_capacity(content.len() + 256);
    out.push_str(&content[..range.start]);
    out.push_str(&render_block(plan));
    out.push_str(&content[range.end..]);
    Some(out)
}

/// `2024_05_01_093000_create_posts_table.php`
#[must_use]
pub fn file_name(timestamp: NaiveDateTime, table: &str) -> String {
    format!(
        "{}_create_{table}_table.php",
        timestamp.format("%Y_%m_%d_%H%M%S")
    )
}

/// File-name fragment shared by every create migration for `entity`.
#[must_use]
pub fn name_hint(entity: &str) -> String {
    naming::migration_name(entity)
}

/// Anonymous-class migration with an empty create-table block.
#[must_use]
pub fn stub(table: &str) -> String {
    document(
        table,
        &render_block(&MigrationPlan {
            table: table.to_string(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }),
    )
}

/// A complete new migration whose create-table block already holds `plan`.
#[must_use]
pub fn render_new(plan: &MigrationPlan) -> String {
    document(&plan.table, &render_block(plan))
}

fn document(table: &str, block: &str) -> String {
    let table = php::quote(table);
    format!(
        "<?php

use Illuminate\\Database\\Migrations\\Migration;
use Illuminate\\Database\\Schema\\Blueprint;
use Illuminate\\Support\\Facades\\Schema;

return new class extends Migration
{{
    /**
     * Run the migrations.
     */
    public function up(): void
    {{
        {block});
    }}

    /**
     * Reverse the migrations.
     */
    public function down(): void
    {{
        Schema::dropIfExists({table});
    }}
}};
"
    )
}
