//! # Flags
//!
//! The fixed universe of sub-user permission flags known to the panel.
//! Every flag has an internal upper-snake-case name and a numeric code.
//! The universe never changes at runtime.

use serde::{Deserialize, Serialize};

/// A single permission flag.
///
/// Variants are declared in ascending code order, so the derived `Ord`
/// sorts flags by code. The codes are dense from 0 to 35; the wildcard
/// sits at 40 and the administrative websocket flags follow it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// Connect to the server websocket.
    #[serde(rename = "WEBSOCKET_CONNECT")]
    WebsocketConnect,

    /// Send console commands.
    #[serde(rename = "CONTROL_CONSOLE")]
    ControlConsole,
    /// Start the server.
    #[serde(rename = "CONTROL_START")]
    ControlStart,
    /// Stop the server.
    #[serde(rename = "CONTROL_STOP")]
    ControlStop,
    /// Restart the server.
    #[serde(rename = "CONTROL_RESTART")]
    ControlRestart,

    #[serde(rename = "USER_CREATE")]
    UserCreate,
    #[serde(rename = "USER_READ")]
    UserRead,
    #[serde(rename = "USER_UPDATE")]
    UserUpdate,
    #[serde(rename = "USER_DELETE")]
    UserDelete,

    #[serde(rename = "FILE_CREATE")]
    FileCreate,
    #[serde(rename = "FILE_READ")]
    FileRead,
    #[serde(rename = "FILE_UPDATE")]
    FileUpdate,
    #[serde(rename = "FILE_DELETE")]
    FileDelete,
    #[serde(rename = "FILE_ARCHIVE")]
    FileArchive,
    /// Access the server over SFTP.
    #[serde(rename = "FILE_SFTP")]
    FileSftp,

    #[serde(rename = "BACKUP_CREATE")]
    BackupCreate,
    #[serde(rename = "BACKUP_READ")]
    BackupRead,
    #[serde(rename = "BACKUP_UPDATE")]
    BackupUpdate,
    #[serde(rename = "BACKUP_DELETE")]
    BackupDelete,

    #[serde(rename = "ALLOCATION_READ")]
    AllocationRead,
    #[serde(rename = "ALLOCATION_CREATE")]
    AllocationCreate,
    #[serde(rename = "ALLOCATION_UPDATE")]
    AllocationUpdate,
    #[serde(rename = "ALLOCATION_DELETE")]
    AllocationDelete,

    #[serde(rename = "STARTUP_READ")]
    StartupRead,
    #[serde(rename = "STARTUP_UPDATE")]
    StartupUpdate,

    #[serde(rename = "DATABASE_CREATE")]
    DatabaseCreate,
    #[serde(rename = "DATABASE_READ")]
    DatabaseRead,
    #[serde(rename = "DATABASE_UPDATE")]
    DatabaseUpdate,
    #[serde(rename = "DATABASE_DELETE")]
    DatabaseDelete,
    /// Reveal database passwords.
    #[serde(rename = "DATABASE_VIEW_PASSWORD")]
    DatabaseViewPassword,

    #[serde(rename = "SCHEDULE_CREATE")]
    ScheduleCreate,
    #[serde(rename = "SCHEDULE_READ")]
    ScheduleRead,
    #[serde(rename = "SCHEDULE_UPDATE")]
    ScheduleUpdate,
    #[serde(rename = "SCHEDULE_DELETE")]
    ScheduleDelete,

    #[serde(rename = "SETTINGS_RENAME")]
    SettingsRename,
    #[serde(rename = "SETTINGS_REINSTALL")]
    SettingsReinstall,

    /// Wildcard: every permission.
    #[serde(rename = "*")]
    All,
    #[serde(rename = "ADMIN_WEBSOCKET_ERRORS")]
    AdminWebsocketErrors,
    #[serde(rename = "ADMIN_WEBSOCKET_INSTALL")]
    AdminWebsocketInstall,
    #[serde(rename = "ADMIN_WEBSOCKET_TRANSFER")]
    AdminWebsocketTransfer,
}

/// Substring that marks a flag name as administrative.
pub const ADMIN_MARKER: &str = "ADMIN";

impl Flag {
    /// Every known flag, in ascending code order.
    pub const ALL: [Flag; 40] = [
        Flag::WebsocketConnect,
        Flag::ControlConsole,
        Flag::ControlStart,
        Flag::ControlStop,
        Flag::ControlRestart,
        Flag::UserCreate,
        Flag::UserRead,
        Flag::UserUpdate,
        Flag::UserDelete,
        Flag::FileCreate,
        Flag::FileRead,
        Flag::FileUpdate,
        Flag::FileDelete,
        Flag::FileArchive,
        Flag::FileSftp,
        Flag::BackupCreate,
        Flag::BackupRead,
        Flag::BackupUpdate,
        Flag::BackupDelete,
        Flag::AllocationRead,
        Flag::AllocationCreate,
        Flag::AllocationUpdate,
        Flag::AllocationDelete,
        Flag::StartupRead,
        Flag::StartupUpdate,
        Flag::DatabaseCreate,
        Flag::DatabaseRead,
        Flag::DatabaseUpdate,
        Flag::DatabaseDelete,
        Flag::DatabaseViewPassword,
        Flag::ScheduleCreate,
        Flag::ScheduleRead,
        Flag::ScheduleUpdate,
        Flag::ScheduleDelete,
        Flag::SettingsRename,
        Flag::SettingsReinstall,
        Flag::All,
        Flag::AdminWebsocketErrors,
        Flag::AdminWebsocketInstall,
        Flag::AdminWebsocketTransfer,
    ];

    /// Get the internal (upper-snake-case) name of the flag.
    ///
    /// # Example
    ///
    /// ```
    /// use ptero_permissions::Flag;
    ///
    /// assert_eq!(Flag::ControlConsole.name(), "CONTROL_CONSOLE");
    /// assert_eq!(Flag::All.name(), "*");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Flag::WebsocketConnect => "WEBSOCKET_CONNECT",
            Flag::ControlConsole => "CONTROL_CONSOLE",
            Flag::ControlStart => "CONTROL_START",
            Flag::ControlStop => "CONTROL_STOP",
            Flag::ControlRestart => "CONTROL_RESTART",
            Flag::UserCreate => "USER_CREATE",
            Flag::UserRead => "USER_READ",
            Flag::UserUpdate => "USER_UPDATE",
            Flag::UserDelete => "USER_DELETE",
            Flag::FileCreate => "FILE_CREATE",
            Flag::FileRead => "FILE_READ",
            Flag::FileUpdate => "FILE_UPDATE",
            Flag::FileDelete => "FILE_DELETE",
            Flag::FileArchive => "FILE_ARCHIVE",
            Flag::FileSftp => "FILE_SFTP",
            Flag::BackupCreate => "BACKUP_CREATE",
            Flag::BackupRead => "BACKUP_READ",
            Flag::BackupUpdate => "BACKUP_UPDATE",
            Flag::BackupDelete => "BACKUP_DELETE",
            Flag::AllocationRead => "ALLOCATION_READ",
            Flag::AllocationCreate => "ALLOCATION_CREATE",
            Flag::AllocationUpdate => "ALLOCATION_UPDATE",
            Flag::AllocationDelete => "ALLOCATION_DELETE",
            Flag::StartupRead => "STARTUP_READ",
            Flag::StartupUpdate => "STARTUP_UPDATE",
            Flag::DatabaseCreate => "DATABASE_CREATE",
            Flag::DatabaseRead => "DATABASE_READ",
            Flag::DatabaseUpdate => "DATABASE_UPDATE",
            Flag::DatabaseDelete => "DATABASE_DELETE",
            Flag::DatabaseViewPassword => "DATABASE_VIEW_PASSWORD",
            Flag::ScheduleCreate => "SCHEDULE_CREATE",
            Flag::ScheduleRead => "SCHEDULE_READ",
            Flag::ScheduleUpdate => "SCHEDULE_UPDATE",
            Flag::ScheduleDelete => "SCHEDULE_DELETE",
            Flag::SettingsRename => "SETTINGS_RENAME",
            Flag::SettingsReinstall => "SETTINGS_REINSTALL",
            Flag::All => "*",
            Flag::AdminWebsocketErrors => "ADMIN_WEBSOCKET_ERRORS",
            Flag::AdminWebsocketInstall => "ADMIN_WEBSOCKET_INSTALL",
            Flag::AdminWebsocketTransfer => "ADMIN_WEBSOCKET_TRANSFER",
        }
    }

    /// Get the numeric code of the flag.
    pub fn code(&self) -> u32 {
        match self {
            Flag::All => 40,
            Flag::AdminWebsocketErrors => 41,
            Flag::AdminWebsocketInstall => 42,
            Flag::AdminWebsocketTransfer => 43,
            // Everything before the wildcard is dense from zero.
            other => *other as u32,
        }
    }

    /// Get the external (lowercase, dot-delimited) form of the flag name.
    ///
    /// # Example
    ///
    /// ```
    /// use ptero_permissions::Flag;
    ///
    /// assert_eq!(Flag::ControlConsole.external_name(), "control.console");
    /// assert_eq!(Flag::DatabaseViewPassword.external_name(), "database.view.password");
    /// ```
    pub fn external_name(&self) -> String {
        self.name().to_lowercase().replace('_', ".")
    }

    /// Look up a flag by its exact internal name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Look up a flag by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.code() == code)
    }

    /// Translate an external name into a flag.
    ///
    /// The input is uppercased and `.` becomes `_` before lookup, so
    /// `"control.console"` and `"CONTROL_CONSOLE"` both resolve.
    ///
    /// # Example
    ///
    /// ```
    /// use ptero_permissions::Flag;
    ///
    /// assert_eq!(Flag::parse("control.console"), Some(Flag::ControlConsole));
    /// assert_eq!(Flag::parse("*"), Some(Flag::All));
    /// assert_eq!(Flag::parse("bogus.flag"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_name(&Self::translate(s))
    }

    /// Check if the flag is administrative.
    pub fn is_admin(&self) -> bool {
        self.name().contains(ADMIN_MARKER)
    }

    pub(crate) fn translate(s: &str) -> String {
        s.to_uppercase().replace('.', "_")
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
