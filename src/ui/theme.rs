//! Class helpers so pages and components share one set of styles from
//! `assets/main.css`.

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary() -> &'static str {
    "btn btn-primary"
}

/// Toggle-style button, e.g. the preset size picker.
pub fn btn_choice(active: bool) -> &'static str {
    if active {
        "btn btn-choice active"
    } else {
        "btn btn-choice"
    }
}

pub fn btn_small() -> &'static str {
    "btn btn-small"
}

pub fn btn_danger() -> &'static str {
    "btn btn-small btn-danger"
}

pub fn btn_icon() -> &'static str {
    "btn btn-icon"
}

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-btn active"
    } else {
        "nav-btn"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class() -> &'static str {
    "input"
}

pub fn label_class() -> &'static str {
    "label"
}

// ============================================
// PANEL / TABLE STYLES
// ============================================

pub fn panel() -> &'static str {
    "panel"
}

pub fn table_container() -> &'static str {
    "table-wrap"
}

pub fn entry_row(is_best: bool) -> &'static str {
    if is_best {
        "entry-row best"
    } else {
        "entry-row"
    }
}

// ============================================
// TEXT STYLES
// ============================================

pub fn text_muted() -> &'static str {
    "muted"
}

pub fn accent_text() -> &'static str {
    "accent"
}
