//! Fixed table-name to short-tag mapping

use crate::codec::Symbol;

const TABLE_TAGS: &[(&str, Symbol)] = &[
    ("block_info", Symbol::from_text("block.info")),
    ("transaction_trace", Symbol::from_text("ttrace")),
    ("action_trace", Symbol::from_text("atrace")),
    ("account", Symbol::from_text("account")),
    ("account_metadata", Symbol::from_text("account.meta")),
    ("code", Symbol::from_text("code")),
    ("contract_table", Symbol::from_text("c.table")),
    ("contract_row", Symbol::from_text("c.row")),
    ("contract_index64", Symbol::from_text("c.index64")),
    ("contract_index128", Symbol::from_text("c.index128")),
    // Shares the 128-bit index tag; stores filled by the ingester use it.
    ("contract_index256", Symbol::from_text("c.index128")),
    ("contract_index_double", Symbol::from_text("c.index.d")),
    ("contract_index_long_double", Symbol::from_text("c.index.ld")),
    ("global_property", Symbol::from_text("glob.prop")),
    ("generated_transaction", Symbol::from_text("gen.tx")),
    ("protocol_state", Symbol::from_text("protocol.st")),
    ("permission", Symbol::from_text("permission")),
    ("permission_link", Symbol::from_text("perm.link")),
    ("resource_limits", Symbol::from_text("res.lim")),
    ("resource_usage", Symbol::from_text("res.usage")),
    ("resource_limits_state", Symbol::from_text("res.lim.stat")),
    ("resource_limits_config", Symbol::from_text("res.lim.conf")),
];

/// Short tag for a table name, if the table is known
pub fn table_tag(name: &str) -> Option<Symbol> {
    TABLE_TAGS
        .iter()
        .find(|(table, _)| *table == name)
        .map(|(_, tag)| *tag)
}

/// Every known table name with its tag
pub fn known_tables() -> impl Iterator<Item = (&'static str, Symbol)> {
    TABLE_TAGS.iter().copied()
}
