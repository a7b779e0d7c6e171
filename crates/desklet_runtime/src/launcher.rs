//! Launcher registry: descriptor classification, icon variants, and click activation.

use desklet_host::{DockItemRecord, DockItemType, HostServices, WindowHandle};
use serde::{Deserialize, Serialize};

use crate::model::{ActivationBinding, LauncherIcon, LauncherRecord, ViewListMode};

/// Icon source token marking a web bookmark.
pub const BOOKMARK_ICON_SOURCE: &str = ".url";
/// Glyph used for dropped files without an extension.
pub const GENERIC_FILE_GLYPH: &str = "FILE";

/// Explicit launcher registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LauncherSpec {
    /// Image path, `.url`, or a leading-dot type token.
    pub icon_source: Option<String>,
    pub executable: Option<String>,
    /// Custom shell command; takes precedence over `executable` on click.
    pub command: Option<String>,
    pub title: Option<String>,
    pub display_name: Option<String>,
    pub class_name: Option<String>,
    pub workspace: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroppedFileKind {
    Executable,
    File,
    /// Anything else (directories, volumes); never registered.
    Other,
}

/// File-system entry dropped onto a desklet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub kind: DroppedFileKind,
    pub title: Option<String>,
    pub filename: String,
    pub path: String,
    pub icon_file: Option<String>,
}

impl DroppedFile {
    fn display_title(&self) -> String {
        self.title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.filename.clone())
    }
}

/// Bookmark file whose metadata resolves a link and favicon later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkSpec {
    pub path: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LauncherDescriptor {
    Launcher(LauncherSpec),
    FileDrop(DroppedFile),
    Bookmark(BookmarkSpec),
}

/// Picks the icon presentation for an icon source token.
pub fn resolve_icon(icon_source: &str, label: &str) -> LauncherIcon {
    if icon_source == BOOKMARK_ICON_SOURCE {
        return LauncherIcon::Bookmark {
            label: label.to_string(),
            favicon: None,
        };
    }
    match icon_source.strip_prefix('.') {
        Some(token) => LauncherIcon::TypeGlyph(token.to_uppercase()),
        None => LauncherIcon::Image(icon_source.to_string()),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|value| !value.is_empty())
}

/// Validates a descriptor into a launcher record.
///
/// Returns `None` for descriptors missing an icon source or an activation binding, and for
/// dropped entries that are neither executables nor files.
pub fn build_record(descriptor: &LauncherDescriptor) -> Option<LauncherRecord> {
    match descriptor {
        LauncherDescriptor::Launcher(spec) => {
            let icon_source = non_empty(&spec.icon_source)?;
            let binding = match (non_empty(&spec.command), non_empty(&spec.executable)) {
                (Some(command), _) => ActivationBinding::Command(command),
                (None, Some(executable)) => ActivationBinding::Executable(executable),
                (None, None) => return None,
            };
            let mut record = LauncherRecord {
                binding,
                icon: LauncherIcon::Image(String::new()),
                icon_source: icon_source.clone(),
                title: spec.title.clone(),
                display_name: spec.display_name.clone(),
                class_name: spec.class_name.clone(),
                workspace: spec.workspace,
                running: false,
                link: None,
            };
            record.icon = resolve_icon(&icon_source, &record.label());
            Some(record)
        }
        LauncherDescriptor::FileDrop(file) => {
            let title = file.display_title();
            let (executable, icon_source, icon) = match file.kind {
                DroppedFileKind::Executable => {
                    let icon_source = non_empty(&file.icon_file)?;
                    let icon = resolve_icon(&icon_source, &title);
                    (title.clone(), icon_source, icon)
                }
                DroppedFileKind::File => {
                    if file.path.is_empty() {
                        return None;
                    }
                    let glyph = extension_of(&title)
                        .map(|ext| ext.trim_start_matches('.').to_uppercase())
                        .unwrap_or_else(|| GENERIC_FILE_GLYPH.to_string());
                    (file.path.clone(), title.clone(), LauncherIcon::TypeGlyph(glyph))
                }
                DroppedFileKind::Other => return None,
            };
            Some(LauncherRecord {
                binding: ActivationBinding::Executable(executable),
                icon,
                icon_source,
                title: Some(title),
                display_name: None,
                class_name: None,
                workspace: None,
                running: false,
                link: None,
            })
        }
        LauncherDescriptor::Bookmark(bookmark) => {
            if bookmark.path.is_empty() {
                return None;
            }
            let label = non_empty(&bookmark.title).unwrap_or_else(|| bookmark.path.clone());
            Some(LauncherRecord {
                binding: ActivationBinding::Executable(bookmark.path.clone()),
                icon: LauncherIcon::Bookmark {
                    label,
                    favicon: None,
                },
                icon_source: BOOKMARK_ICON_SOURCE.to_string(),
                title: bookmark.title.clone(),
                display_name: None,
                class_name: None,
                workspace: None,
                running: false,
                link: None,
            })
        }
    }
}

/// Dock configuration entry written after a dropped file registers.
pub fn dock_record_for_drop(file: &DroppedFile) -> Option<DockItemRecord> {
    let title = file.display_title();
    let (item_type, application, icon) = match file.kind {
        DroppedFileKind::Executable => (
            DockItemType::Executable,
            title,
            file.icon_file.clone().unwrap_or_default(),
        ),
        DroppedFileKind::File => (DockItemType::File, file.path.clone(), title),
        DroppedFileKind::Other => return None,
    };
    Some(DockItemRecord {
        item_type,
        application,
        icon,
        short_description: String::new(),
    })
}

/// Splits an executable string into its base token and argument string.
///
/// Only strings with an interior space and a path-free first token are split; `Volume:My App`
/// stays whole.
pub fn tokenize_executable(executable: &str) -> (String, String) {
    match executable.find(' ') {
        Some(index) if index > 0 => {
            let (base, rest) = executable.split_at(index);
            if base.contains(':') {
                (executable.to_string(), String::new())
            } else {
                (base.to_string(), rest[1..].to_string())
            }
        }
        _ => (executable.to_string(), String::new()),
    }
}

/// Workspace a launch should land on. Workspace 0 means "unset", like an absent value.
pub fn target_workspace(workspace: Option<u32>) -> Option<u32> {
    workspace.filter(|workspace| *workspace > 0)
}

/// Appends `workspace=<n>` to an argument string when [`target_workspace`] names one.
pub fn with_workspace_arg(args: &str, workspace: Option<u32>) -> String {
    match target_workspace(workspace) {
        Some(workspace) if args.is_empty() => format!("workspace={workspace}"),
        Some(workspace) => format!("{args} workspace={workspace}"),
        None => args.to_string(),
    }
}

/// Lower-cased extension (leading dot included) of the last path segment, if any.
pub fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit(['/', ':']).next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

#[derive(Deserialize)]
struct BookmarkMetadata {
    link: Option<String>,
}

/// Extracts the `link` field from bookmark metadata. Malformed text yields `None`.
pub fn parse_bookmark_link(raw: &str) -> Option<String> {
    serde_json::from_str::<BookmarkMetadata>(raw)
        .ok()?
        .link
        .filter(|link| !link.is_empty())
}

/// `scheme://host/favicon.ico` for a link.
pub fn favicon_url(link: &str) -> Option<String> {
    let (scheme, rest) = link.split_once("://")?;
    let host = rest.split('/').next().unwrap_or_default();
    if scheme.is_empty() || host.is_empty() {
        return None;
    }
    Some(format!("{scheme}://{host}/favicon.ico"))
}

/// Shell state consulted on click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivationContext {
    pub view_list: ViewListMode,
    pub mobile: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Bookmark with a resolved link; the caller opens it externally.
    OpenedLink(String),
    /// Custom command; the caller hands it to the shell.
    RanCommand(String),
    /// Visible windows of the executable were toggled instead of launching.
    ToggledVisibility,
    /// A path-like target was opened with its MIME handler.
    OpenedWithHandler { handler: String, target: String },
    Launched { executable: String, args: String },
    /// A running single-instance process was raised.
    RaisedInstance(WindowHandle),
}

impl ActivationOutcome {
    /// Launches and raises switch workspace and close the mobile overlay.
    pub fn is_launch(&self) -> bool {
        matches!(self, Self::Launched { .. } | Self::RaisedInstance(_))
    }
}

/// Runs the click path for `record` against the host collaborators.
///
/// Link and command outcomes are returned for the caller to dispatch; everything else has already
/// been requested from the window manager or process launcher when this returns.
pub fn activate(
    record: &LauncherRecord,
    context: ActivationContext,
    host: &HostServices,
) -> ActivationOutcome {
    if let Some(link) = &record.link {
        return ActivationOutcome::OpenedLink(link.clone());
    }
    let executable = match &record.binding {
        ActivationBinding::Command(command) => {
            return ActivationOutcome::RanCommand(command.clone());
        }
        ActivationBinding::Executable(executable) => executable.as_str(),
    };

    if !context.mobile && host.windows.toggle_visibility(executable) {
        return ActivationOutcome::ToggledVisibility;
    }

    let (base, args) = tokenize_executable(executable);
    let args = with_workspace_arg(&args, record.workspace);

    if base.find(':').is_some_and(|index| index > 0) {
        if let Some(handler) = extension_of(&base)
            .and_then(|ext| host.mime.resolve_handler_for_extension(&ext))
        {
            host.processes.execute(&handler, &base);
            return ActivationOutcome::OpenedWithHandler {
                handler,
                target: base,
            };
        }
    }

    let has_arguments = executable.find(' ').is_some_and(|index| index > 0);
    let launch_new = (!context.view_list.is_docked() && !host.processes.is_single_instance(&base))
        || has_arguments;

    let outcome = match (launch_new, host.processes.find_running_instance(&base)) {
        (false, Some(window)) => {
            host.windows.raise_and_focus(window);
            ActivationOutcome::RaisedInstance(window)
        }
        _ => {
            host.processes.execute(&base, &args);
            ActivationOutcome::Launched {
                executable: base,
                args,
            }
        }
    };

    if let Some(workspace) = target_workspace(record.workspace) {
        host.windows.switch_workspace(workspace);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use desklet_host::{
        MimeTable, MimeTypeEntry, NoopProcessLauncher, ProcessLauncher, WindowManager,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Calls {
        log: RefCell<Vec<String>>,
        visible: Vec<String>,
        single_instance: Vec<String>,
        running: Vec<(String, WindowHandle)>,
    }

    #[derive(Clone, Default)]
    struct Fake(Rc<Calls>);

    impl WindowManager for Fake {
        fn toggle_visibility(&self, executable: &str) -> bool {
            self.0.visible.iter().any(|exe| exe == executable)
        }

        fn raise_and_focus(&self, window: WindowHandle) {
            self.0.log.borrow_mut().push(format!("raise {}", window.0));
        }

        fn switch_workspace(&self, workspace: u32) {
            self.0.log.borrow_mut().push(format!("workspace {workspace}"));
        }
    }

    impl ProcessLauncher for Fake {
        fn execute(&self, executable: &str, args: &str) {
            self.0
                .log
                .borrow_mut()
                .push(format!("execute {executable} [{args}]"));
        }

        fn is_single_instance(&self, executable: &str) -> bool {
            self.0.single_instance.iter().any(|exe| exe == executable)
        }

        fn find_running_instance(&self, executable: &str) -> Option<WindowHandle> {
            self.0
                .running
                .iter()
                .find(|(exe, _)| exe == executable)
                .map(|(_, window)| *window)
        }
    }

    fn host_with(calls: Calls) -> (HostServices, Fake) {
        let fake = Fake(Rc::new(calls));
        let mut host = HostServices::noop();
        host.windows = Rc::new(fake.clone());
        host.processes = Rc::new(fake.clone());
        host.mime = Rc::new(MimeTable::new(vec![MimeTypeEntry {
            executable: "Author".to_string(),
            types: vec![".txt".to_string()],
        }]));
        (host, fake)
    }

    fn launcher(executable: &str) -> LauncherRecord {
        build_record(&LauncherDescriptor::Launcher(LauncherSpec {
            icon_source: Some("gfx/app.png".to_string()),
            executable: Some(executable.to_string()),
            ..LauncherSpec::default()
        }))
        .expect("valid launcher")
    }

    fn log(fake: &Fake) -> Vec<String> {
        fake.0.log.borrow().clone()
    }

    #[test]
    fn launcher_without_icon_or_binding_is_rejected() {
        assert_eq!(
            build_record(&LauncherDescriptor::Launcher(LauncherSpec {
                executable: Some("Author".to_string()),
                ..LauncherSpec::default()
            })),
            None
        );
        assert_eq!(
            build_record(&LauncherDescriptor::Launcher(LauncherSpec {
                icon_source: Some("a.png".to_string()),
                ..LauncherSpec::default()
            })),
            None
        );
    }

    #[test]
    fn icon_sources_pick_image_glyph_or_bookmark() {
        assert_eq!(
            resolve_icon("gfx/app.png", "App"),
            LauncherIcon::Image("gfx/app.png".to_string())
        );
        assert_eq!(
            resolve_icon(".jpg", "photo"),
            LauncherIcon::TypeGlyph("JPG".to_string())
        );
        assert_eq!(
            resolve_icon(".url", "News"),
            LauncherIcon::Bookmark {
                label: "News".to_string(),
                favicon: None
            }
        );
    }

    #[test]
    fn dropped_entries_classify_into_records_and_dock_entries() {
        let executable = DroppedFile {
            kind: DroppedFileKind::Executable,
            title: Some("Author".to_string()),
            filename: "Author".to_string(),
            path: "System:Software/Author/".to_string(),
            icon_file: Some("gfx/author.png".to_string()),
        };
        let record = build_record(&LauncherDescriptor::FileDrop(executable.clone()))
            .expect("executable record");
        assert_eq!(record.executable(), Some("Author"));
        assert_eq!(record.icon, LauncherIcon::Image("gfx/author.png".to_string()));
        assert_eq!(
            dock_record_for_drop(&executable),
            Some(DockItemRecord {
                item_type: DockItemType::Executable,
                application: "Author".to_string(),
                icon: "gfx/author.png".to_string(),
                short_description: String::new(),
            })
        );

        let file = DroppedFile {
            kind: DroppedFileKind::File,
            title: None,
            filename: "Report.PDF".to_string(),
            path: "Home:Documents/Report.PDF".to_string(),
            icon_file: None,
        };
        let record = build_record(&LauncherDescriptor::FileDrop(file.clone())).expect("file");
        assert_eq!(record.executable(), Some("Home:Documents/Report.PDF"));
        assert_eq!(record.icon, LauncherIcon::TypeGlyph("PDF".to_string()));
        assert_eq!(
            dock_record_for_drop(&file).map(|entry| entry.item_type),
            Some(DockItemType::File)
        );

        let folder = DroppedFile {
            kind: DroppedFileKind::Other,
            ..file
        };
        assert_eq!(build_record(&LauncherDescriptor::FileDrop(folder.clone())), None);
        assert_eq!(dock_record_for_drop(&folder), None);
    }

    #[test]
    fn tokenizer_splits_plain_commands_but_not_paths() {
        assert_eq!(
            tokenize_executable("Author --new doc.txt"),
            ("Author".to_string(), "--new doc.txt".to_string())
        );
        assert_eq!(
            tokenize_executable("Home:My Files/a.txt"),
            ("Home:My Files/a.txt".to_string(), String::new())
        );
        assert_eq!(
            tokenize_executable(" Author"),
            (" Author".to_string(), String::new())
        );
        assert_eq!(with_workspace_arg("", Some(2)), "workspace=2");
        assert_eq!(with_workspace_arg("-x", Some(2)), "-x workspace=2");
        assert_eq!(with_workspace_arg("-x", None), "-x");
        assert_eq!(with_workspace_arg("-x", Some(0)), "-x");
    }

    #[test]
    fn extensions_come_from_the_last_segment() {
        assert_eq!(extension_of("Home:Docs/Notes.TXT"), Some(".txt".to_string()));
        assert_eq!(extension_of("Home:archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(extension_of("Home:Docs.d/README"), None);
        assert_eq!(extension_of("Home:.profile"), None);
    }

    #[test]
    fn bookmark_metadata_parses_link_and_favicon() {
        assert_eq!(
            parse_bookmark_link(r#"{"link":"http://example.org/a/b","name":"x"}"#),
            Some("http://example.org/a/b".to_string())
        );
        assert_eq!(parse_bookmark_link("{]"), None);
        assert_eq!(parse_bookmark_link(r#"{"name":"x"}"#), None);
        assert_eq!(
            favicon_url("https://example.org/a/b"),
            Some("https://example.org/favicon.ico".to_string())
        );
        assert_eq!(favicon_url("example.org"), None);
    }

    #[test]
    fn visible_windows_are_toggled_instead_of_launching() {
        let (host, fake) = host_with(Calls {
            visible: vec!["Author".to_string()],
            ..Calls::default()
        });
        let outcome = activate(&launcher("Author"), ActivationContext::default(), &host);
        assert_eq!(outcome, ActivationOutcome::ToggledVisibility);
        assert!(log(&fake).is_empty());

        let mobile = ActivationContext {
            mobile: true,
            ..ActivationContext::default()
        };
        assert!(activate(&launcher("Author"), mobile, &host).is_launch());
    }

    #[test]
    fn plain_launch_passes_arguments_and_switches_workspace() {
        let (host, fake) = host_with(Calls::default());
        let mut record = launcher("Author --new");
        record.workspace = Some(3);

        let outcome = activate(&record, ActivationContext::default(), &host);
        assert_eq!(
            outcome,
            ActivationOutcome::Launched {
                executable: "Author".to_string(),
                args: "--new workspace=3".to_string(),
            }
        );
        assert_eq!(
            log(&fake),
            vec![
                "execute Author [--new workspace=3]".to_string(),
                "workspace 3".to_string()
            ]
        );
    }

    #[test]
    fn workspace_zero_neither_tags_arguments_nor_switches() {
        let (host, fake) = host_with(Calls::default());
        let mut record = launcher("Author");
        record.workspace = Some(0);

        let outcome = activate(&record, ActivationContext::default(), &host);
        assert_eq!(
            outcome,
            ActivationOutcome::Launched {
                executable: "Author".to_string(),
                args: String::new(),
            }
        );
        assert_eq!(log(&fake), vec!["execute Author []".to_string()]);
    }

    #[test]
    fn path_targets_open_with_their_mime_handler() {
        let (host, fake) = host_with(Calls::default());
        let outcome = activate(
            &launcher("Home:Notes/todo.txt"),
            ActivationContext::default(),
            &host,
        );
        assert_eq!(
            outcome,
            ActivationOutcome::OpenedWithHandler {
                handler: "Author".to_string(),
                target: "Home:Notes/todo.txt".to_string(),
            }
        );
        assert_eq!(log(&fake), vec!["execute Author [Home:Notes/todo.txt]".to_string()]);
    }

    #[test]
    fn single_instance_apps_are_raised_when_running() {
        let (host, fake) = host_with(Calls {
            single_instance: vec!["Mail".to_string()],
            running: vec![("Mail".to_string(), WindowHandle(7))],
            ..Calls::default()
        });
        let outcome = activate(&launcher("Mail"), ActivationContext::default(), &host);
        assert_eq!(outcome, ActivationOutcome::RaisedInstance(WindowHandle(7)));
        assert_eq!(log(&fake), vec!["raise 7".to_string()]);
    }

    #[test]
    fn docked_mode_raises_running_apps_and_launches_missing_ones() {
        let (host, fake) = host_with(Calls {
            running: vec![("Files".to_string(), WindowHandle(2))],
            ..Calls::default()
        });
        let docked = ActivationContext {
            view_list: ViewListMode::Docked,
            mobile: false,
        };
        assert_eq!(
            activate(&launcher("Files"), docked, &host),
            ActivationOutcome::RaisedInstance(WindowHandle(2))
        );
        assert!(matches!(
            activate(&launcher("Mail"), docked, &host),
            ActivationOutcome::Launched { .. }
        ));
        // Arguments always force a fresh launch.
        assert!(matches!(
            activate(&launcher("Files --window"), docked, &host),
            ActivationOutcome::Launched { .. }
        ));
        assert_eq!(
            log(&fake),
            vec![
                "raise 2".to_string(),
                "execute Mail []".to_string(),
                "execute Files [--window]".to_string(),
            ]
        );
    }

    #[test]
    fn links_and_commands_are_returned_to_the_caller() {
        let mut host = HostServices::noop();
        host.processes = Rc::new(NoopProcessLauncher);

        let mut bookmark = build_record(&LauncherDescriptor::Bookmark(BookmarkSpec {
            path: "Home:news.url".to_string(),
            title: None,
        }))
        .expect("bookmark");
        bookmark.link = Some("https://news.example".to_string());
        assert_eq!(
            activate(&bookmark, ActivationContext::default(), &host),
            ActivationOutcome::OpenedLink("https://news.example".to_string())
        );

        let command = build_record(&LauncherDescriptor::Launcher(LauncherSpec {
            icon_source: Some("gfx/menu.png".to_string()),
            command: Some("menu.toggle".to_string()),
            ..LauncherSpec::default()
        }))
        .expect("command launcher");
        assert_eq!(
            activate(&command, ActivationContext::default(), &host),
            ActivationOutcome::RanCommand("menu.toggle".to_string())
        );
    }
}
