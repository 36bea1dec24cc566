//! Centralized icon definitions.
//!
//! Maps semantic icon names to the Bootstrap icon set. Change the set here.

use icondata::Icon;

// =============================================================================
// Header
// =============================================================================

pub const LIBRARY: Icon = icondata::BsJournalText;
pub const GITHUB: Icon = icondata::BsGithub;
pub const FOLDER: Icon = icondata::BsFolderFill;
pub const THEME_LIGHT: Icon = icondata::BsSunFill;
pub const THEME_DARK: Icon = icondata::BsMoonFill;

// =============================================================================
// Browser
// =============================================================================

pub const SEARCH: Icon = icondata::BsSearch;
pub const SORT_LATEST: Icon = icondata::BsSortDown;
pub const SORT_OLDEST: Icon = icondata::BsSortUp;
pub const FILE_TEXT: Icon = icondata::BsFileEarmarkText;
pub const RETRY: Icon = icondata::BsArrowClockwise;

// =============================================================================
// Viewer
// =============================================================================

pub const COPY: Icon = icondata::BsClipboard;
pub const COPIED: Icon = icondata::BsClipboardCheck;
pub const ERROR: Icon = icondata::BsExclamationTriangle;
