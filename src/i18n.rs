use std::env;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Ja,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Ja];

    /// Parse a locale tag such as `ja_JP.UTF-8`, `en-US` or `ja`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let raw = tag.trim();
        if raw.is_empty() {
            return None;
        }

        let raw = raw
            .split_once('.')
            .map(|(a, _)| a)
            .unwrap_or(raw)
            .replace('_', "-")
            .to_lowercase();

        // C/POSIX is not a real language, skip it to allow fallback
        if matches!(raw.as_str(), "c" | "posix") {
            return None;
        }

        if raw.starts_with("ja") || raw == "jp" {
            return Some(Self::Ja);
        }
        if raw.starts_with("en") {
            return Some(Self::En);
        }
        None
    }

    /// Parse a language code given on the command line. Only `en` and `ja`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }

    /// Parse an answer to the interactive language menu.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "en" | "english" => Some(Self::En),
            "2" | "ja" | "japanese" | "日本語" => Some(Self::Ja),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// Upper-case code used in user-facing messages (`EN`, `JA`).
    pub fn display_code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ja => "JA",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    lang: Lang,
}

impl I18n {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    // Language selection
    pub fn lang_selection_title(&self) -> &'static str {
        match self.lang {
            Lang::En => "Language Selection",
            Lang::Ja => "言語選択",
        }
    }

    pub fn lang_current(&self, lang: &str) -> String {
        match self.lang {
            Lang::En => format!("Current language: {lang}"),
            Lang::Ja => format!("現在の言語: {lang}"),
        }
    }

    pub fn lang_select(&self) -> &'static str {
        match self.lang {
            Lang::En => "Select language:",
            Lang::Ja => "言語を選択:",
        }
    }

    pub fn lang_option_en(&self) -> &'static str {
        match self.lang {
            Lang::En => "1. English (en)",
            Lang::Ja => "1. 英語 (en)",
        }
    }

    pub fn lang_option_ja(&self) -> &'static str {
        match self.lang {
            Lang::En => "2. Japanese (ja)",
            Lang::Ja => "2. 日本語 (ja)",
        }
    }

    pub fn lang_prompt(&self) -> &'static str {
        match self.lang {
            Lang::En => "Enter choice (1/2) or language code (en/ja): ",
            Lang::Ja => "選択を入力 (1/2) または言語コード (en/ja): ",
        }
    }

    pub fn lang_invalid(&self) -> &'static str {
        match self.lang {
            Lang::En => "Invalid choice. Please enter 1, 2, 'en', or 'ja'.",
            Lang::Ja => "無効な選択です。1、2、「en」、または「ja」を入力してください。",
        }
    }

    pub fn lang_flag_invalid(&self, value: &str) -> String {
        match self.lang {
            Lang::En => format!("Warning: Invalid language '{value}'. Using interactive selection."),
            Lang::Ja => format!("警告: 無効な言語「{value}」です。対話形式で選択します。"),
        }
    }

    // Language switching
    pub fn lang_switch_title(&self) -> &'static str {
        match self.lang {
            Lang::En => "Switching Language",
            Lang::Ja => "言語を切り替え中",
        }
    }

    pub fn lang_switch_success(&self, lang: &str) -> String {
        match self.lang {
            Lang::En => format!("✓ Switched to {lang}"),
            Lang::Ja => format!("✓ {lang} に切り替えました"),
        }
    }

    pub fn lang_switch_preserved(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("  Preserved MEMORY_PATH: {path}"),
            Lang::Ja => format!("  MEMORY_PATH を保持: {path}"),
        }
    }

    pub fn lang_switch_path_not_configured(&self) -> &'static str {
        match self.lang {
            Lang::En => "Warning: No configured MEMORY_PATH was found; the template placeholder was kept.\n  Run the memory path configuration step to set it.",
            Lang::Ja => "警告: 設定済みの MEMORY_PATH が見つからなかったため、テンプレートのプレースホルダーをそのまま残しました。\n  メモリパスの設定手順を実行して設定してください。",
        }
    }

    pub fn lang_switch_backup(&self, file: &str, detected: &str) -> String {
        match self.lang {
            Lang::En => format!("Backing up current {file} (detected: {detected})..."),
            Lang::Ja => format!("現在の {file} をバックアップ中 (検出: {detected})..."),
        }
    }

    pub fn lang_switch_mirror_created(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("✓ Created {file} (for Google Antigravity support)"),
            Lang::Ja => format!("✓ {file} を作成しました（Google Antigravity サポート用）"),
        }
    }

    pub fn lang_switch_mirror_warning(&self, file: &str, error: &str) -> String {
        match self.lang {
            Lang::En => format!("Warning: Could not create/update {file}: {error}"),
            Lang::Ja => format!("警告: {file} を作成/更新できませんでした: {error}"),
        }
    }

    pub fn lang_switch_complete(&self) -> &'static str {
        match self.lang {
            Lang::En => "Language switching complete!",
            Lang::Ja => "言語の切り替えが完了しました！",
        }
    }

    pub fn err_template_missing(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("Error: Source file '{file}' not found."),
            Lang::Ja => format!("エラー: ソースファイル「{file}」が見つかりません。"),
        }
    }

    pub fn continue_prompt(&self) -> &'static str {
        match self.lang {
            Lang::En => "Do you want to configure memory path now? (yes/no): ",
            Lang::Ja => "メモリパスを今設定しますか？ (yes/no): ",
        }
    }

    pub fn yes_no_invalid(&self) -> &'static str {
        match self.lang {
            Lang::En => "Please answer 'yes' or 'no'.",
            Lang::Ja => "「yes」または「no」で答えてください。",
        }
    }

    pub fn exiting(&self) -> &'static str {
        match self.lang {
            Lang::En => "Exiting setup. Language has been switched successfully.",
            Lang::Ja => "セットアップを終了します。言語の切り替えは正常に完了しました。",
        }
    }

    pub fn exiting_summary(&self, lang: &str) -> String {
        match self.lang {
            Lang::En => format!("Language switched to: {lang}"),
            Lang::Ja => format!("言語を {lang} に切り替えました"),
        }
    }

    // Memory path configuration
    pub fn memory_title(&self) -> &'static str {
        match self.lang {
            Lang::En => "Memory Root Path Configuration",
            Lang::Ja => "メモリルートパス設定",
        }
    }

    pub fn memory_description(&self) -> &'static str {
        match self.lang {
            Lang::En => "Enter the full path where you want to store your memory.",
            Lang::Ja => "メモリを保存する完全なパスを入力してください。",
        }
    }

    pub fn memory_description_detail(&self) -> &'static str {
        match self.lang {
            Lang::En => "This will be the root folder for all memory (projects, common, private).",
            Lang::Ja => "これはすべてのメモリ（プロジェクト、共通、プライベート）のルートフォルダになります。",
        }
    }

    pub fn memory_examples(&self) -> &'static str {
        match self.lang {
            Lang::En => "Examples:",
            Lang::Ja => "例:",
        }
    }

    pub fn memory_note(&self) -> &'static str {
        match self.lang {
            Lang::En => "Note: You can use ~ for home directory. Spaces and special characters are handled automatically.",
            Lang::Ja => "注意: ホームディレクトリには ~ を使用できます。スペースや特殊文字は自動的に処理されます。",
        }
    }

    pub fn memory_note_detail(&self) -> &'static str {
        match self.lang {
            Lang::En => "No need to quote paths - just type them normally. The folder will be created if it doesn't exist.",
            Lang::Ja => "パスを引用符で囲む必要はありません - 通常どおり入力してください。フォルダが存在しない場合は作成されます。",
        }
    }

    pub fn memory_prompt(&self) -> &'static str {
        match self.lang {
            Lang::En => "Enter memory root path: ",
            Lang::Ja => "メモリルートパスを入力: ",
        }
    }

    pub fn err_path_empty(&self) -> &'static str {
        match self.lang {
            Lang::En => "Error: Path cannot be empty.",
            Lang::Ja => "エラー: パスを空にすることはできません。",
        }
    }

    pub fn memory_path_not_exists(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("Path does not exist: {path}"),
            Lang::Ja => format!("パスが存在しません: {path}"),
        }
    }

    pub fn memory_create_prompt(&self) -> &'static str {
        match self.lang {
            Lang::En => "Create this directory? (yes/no): ",
            Lang::Ja => "このディレクトリを作成しますか？ (yes/no): ",
        }
    }

    pub fn memory_create_success(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("✓ Created directory: {path}"),
            Lang::Ja => format!("✓ ディレクトリを作成しました: {path}"),
        }
    }

    pub fn memory_create_error(&self, error: &str) -> String {
        match self.lang {
            Lang::En => format!("Error: Could not create directory: {error}"),
            Lang::Ja => format!("エラー: ディレクトリを作成できませんでした: {error}"),
        }
    }

    pub fn memory_retry(&self) -> &'static str {
        match self.lang {
            Lang::En => "Please enter a different path.",
            Lang::Ja => "別のパスを入力してください。",
        }
    }

    pub fn memory_confirm_path(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("Memory root path: {path}"),
            Lang::Ja => format!("メモリルートパス: {path}"),
        }
    }

    pub fn memory_confirm_structure(&self) -> &'static str {
        match self.lang {
            Lang::En => "This folder will contain: [project-name]/, common/, private/",
            Lang::Ja => "このフォルダには以下が含まれます: [project-name]/, common/, private/",
        }
    }

    pub fn memory_confirm_prompt(&self) -> &'static str {
        match self.lang {
            Lang::En => "Is this correct? (yes/no): ",
            Lang::Ja => "これで正しいですか？ (yes/no): ",
        }
    }

    pub fn memory_confirm_retry(&self) -> &'static str {
        match self.lang {
            Lang::En => "Let's try again.",
            Lang::Ja => "もう一度やり直しましょう。",
        }
    }

    // File operations
    pub fn file_found(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("Found configuration file: {file}"),
            Lang::Ja => format!("設定ファイルが見つかりました: {file}"),
        }
    }

    pub fn err_primary_missing(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("✗ Error: Could not find {file} file."),
            Lang::Ja => format!("✗ エラー: {file} ファイルが見つかりませんでした。"),
        }
    }

    pub fn err_primary_location(&self) -> &'static str {
        match self.lang {
            Lang::En => "  Make sure you're running this tool from the agents-md directory (or pass --dir).",
            Lang::Ja => "  agents-md ディレクトリからこのツールを実行していること（または --dir を指定していること）を確認してください。",
        }
    }

    pub fn file_warning_no_memory_path(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("Warning: No MEMORY_PATH variable definition found in {file}"),
            Lang::Ja => format!("警告: {file} に MEMORY_PATH 変数定義が見つかりませんでした"),
        }
    }

    pub fn file_warning_format(&self) -> &'static str {
        match self.lang {
            Lang::En => "The file may already be configured or uses a different format.",
            Lang::Ja => "ファイルは既に設定されているか、別の形式を使用している可能性があります。",
        }
    }

    pub fn err_update_file(&self, file: &str, error: &str) -> String {
        match self.lang {
            Lang::En => format!("✗ Error updating {file}: {error}"),
            Lang::Ja => format!("✗ {file} の更新エラー: {error}"),
        }
    }

    pub fn mirror_created(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("✓ Created and configured {file}"),
            Lang::Ja => format!("✓ {file} を作成して設定しました"),
        }
    }

    pub fn mirror_warning(&self, file: &str, error: &str) -> String {
        match self.lang {
            Lang::En => format!("Warning: Could not create {file}: {error}"),
            Lang::Ja => format!("警告: {file} を作成できませんでした: {error}"),
        }
    }

    // Memory path update
    pub fn memory_update_success(&self) -> &'static str {
        match self.lang {
            Lang::En => "✓ Successfully updated MEMORY_PATH variable:",
            Lang::Ja => "✓ MEMORY_PATH 変数を正常に更新しました:",
        }
    }

    pub fn memory_update_replaced(&self, count: usize) -> String {
        match self.lang {
            Lang::En => format!("  - Replaced {count} occurrence(s) of {{MEMORY_PATH}}"),
            Lang::Ja => format!("  - {{MEMORY_PATH}} を {count} 箇所置換しました"),
        }
    }

    pub fn memory_update_both(&self, primary: &str, mirror: &str) -> String {
        match self.lang {
            Lang::En => format!("  - Updated in both {primary} (Cursor) and {mirror} (Antigravity)"),
            Lang::Ja => format!("  - {primary} (Cursor) と {mirror} (Antigravity) の両方で更新"),
        }
    }

    pub fn memory_update_primary_only(&self, primary: &str) -> String {
        match self.lang {
            Lang::En => format!("  - Updated in {primary} (Cursor)"),
            Lang::Ja => format!("  - {primary} (Cursor) で更新"),
        }
    }

    pub fn memory_update_mirror_later(&self, mirror: &str) -> String {
        match self.lang {
            Lang::En => format!("  - {mirror} will be created when you copy files to your project"),
            Lang::Ja => format!("  - ファイルをプロジェクトにコピーするときに {mirror} が作成されます"),
        }
    }

    pub fn memory_update_note(&self) -> &'static str {
        match self.lang {
            Lang::En => "Note: Agents understand this variable applies to all path references in the document.",
            Lang::Ja => "注意: エージェントは、この変数がドキュメント内のすべてのパス参照に適用されることを理解します。",
        }
    }

    // Completion
    pub fn complete_title(&self) -> &'static str {
        match self.lang {
            Lang::En => "✓ Configuration complete!",
            Lang::Ja => "✓ 設定が完了しました！",
        }
    }

    pub fn complete_summary(&self) -> &'static str {
        match self.lang {
            Lang::En => "Configuration summary:",
            Lang::Ja => "設定の概要:",
        }
    }

    pub fn complete_lang(&self, lang: &str) -> String {
        match self.lang {
            Lang::En => format!("  - Language: {lang}"),
            Lang::Ja => format!("  - 言語: {lang}"),
        }
    }

    pub fn complete_memory_path(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("  - Memory root path: {path}"),
            Lang::Ja => format!("  - メモリルートパス: {path}"),
        }
    }

    pub fn complete_primary_updated(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("  - {file} updated (for Cursor)"),
            Lang::Ja => format!("  - {file} を更新しました（Cursor 用）"),
        }
    }

    pub fn complete_mirror_updated(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("  - {file} updated (for Google Antigravity)"),
            Lang::Ja => format!("  - {file} を更新しました（Google Antigravity 用）"),
        }
    }

    pub fn complete_next_steps(&self) -> &'static str {
        match self.lang {
            Lang::En => "Next steps:",
            Lang::Ja => "次のステップ:",
        }
    }

    pub fn complete_review(&self, step: usize, file: &str) -> String {
        match self.lang {
            Lang::En => format!("  {step}. Review {file} to verify the changes"),
            Lang::Ja => format!("  {step}. {file} を確認して変更を確認"),
        }
    }

    pub fn complete_copy_files(&self, step: usize, files: &str) -> String {
        match self.lang {
            Lang::En => format!("  {step}. Copy _agents-md/ folder and {files} to your project"),
            Lang::Ja => format!("  {step}. _agents-md/ フォルダと {files} をプロジェクトにコピー"),
        }
    }

    pub fn complete_structure_title(&self) -> &'static str {
        match self.lang {
            Lang::En => "Your memory structure will be:",
            Lang::Ja => "メモリ構造は次のようになります:",
        }
    }

    pub fn complete_structure(&self) -> [&'static str; 3] {
        match self.lang {
            Lang::En => [
                "  ├── [project-name]/  (project-specific memory)",
                "  ├── common/          (shared preferences, patterns)",
                "  └── private/         (credentials, personal info)",
            ],
            Lang::Ja => [
                "  ├── [project-name]/  (プロジェクト固有のメモリ)",
                "  ├── common/          (共有設定、パターン)",
                "  └── private/         (認証情報、個人情報)",
            ],
        }
    }

    // Errors
    pub fn err_lang_switch_failed(&self) -> &'static str {
        match self.lang {
            Lang::En => "✗ Language switch failed. Please check the errors above.",
            Lang::Ja => "✗ 言語の切り替えに失敗しました。上記のエラーを確認してください。",
        }
    }

    pub fn err_config_failed(&self) -> &'static str {
        match self.lang {
            Lang::En => "✗ Configuration failed. Please check the errors above.",
            Lang::Ja => "✗ 設定に失敗しました。上記のエラーを確認してください。",
        }
    }

    pub fn err_cancelled(&self) -> &'static str {
        match self.lang {
            Lang::En => "Operation cancelled by user.",
            Lang::Ja => "ユーザーによって操作がキャンセルされました。",
        }
    }

    // Standalone switcher
    pub fn switcher_current_language(&self, lang: &str) -> String {
        match self.lang {
            Lang::En => format!("Current language: {lang}"),
            Lang::Ja => format!("現在の言語: {lang}"),
        }
    }

    pub fn switcher_not_detected(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("{file} not found or language cannot be detected."),
            Lang::Ja => format!("{file} が見つからないか、言語を検出できません。"),
        }
    }

    pub fn switcher_usage(&self, bin: &str) -> String {
        match self.lang {
            Lang::En => format!(
                "Usage:\n  {bin} en    # Switch to English\n  {bin} ja    # Switch to Japanese"
            ),
            Lang::Ja => format!("使い方:\n  {bin} en    # 英語に切り替え\n  {bin} ja    # 日本語に切り替え"),
        }
    }

    pub fn switcher_invalid_lang(&self, value: &str) -> String {
        match self.lang {
            Lang::En => format!("Error: Invalid language '{value}'. Use 'en' or 'ja'."),
            Lang::Ja => format!("エラー: 無効な言語「{value}」です。「en」または「ja」を使用してください。"),
        }
    }

    pub fn switcher_current_file(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("  Current file: {file}"),
            Lang::Ja => format!("  現在のファイル: {file}"),
        }
    }

    pub fn switcher_backup_saved(&self, file: &str) -> String {
        match self.lang {
            Lang::En => format!("  Backup saved: {file}"),
            Lang::Ja => format!("  バックアップを保存: {file}"),
        }
    }

    // Config messages
    pub fn config_key_not_found(&self, key: &str) -> String {
        match self.lang {
            Lang::En => format!("unknown config key: {key}"),
            Lang::Ja => format!("不明な設定キー: {key}"),
        }
    }

    pub fn config_updated(&self, key: &str, value: &str) -> String {
        match self.lang {
            Lang::En => format!("config updated: {key} = {value}"),
            Lang::Ja => format!("設定を更新しました: {key} = {value}"),
        }
    }

    pub fn config_reset_done(&self) -> &'static str {
        match self.lang {
            Lang::En => "configuration reset to defaults",
            Lang::Ja => "設定をデフォルトに戻しました",
        }
    }

    pub fn config_file_missing(&self) -> &'static str {
        match self.lang {
            Lang::En => "missing",
            Lang::Ja => "なし",
        }
    }

    pub fn config_file_unrecognized(&self) -> &'static str {
        match self.lang {
            Lang::En => "language not recognized",
            Lang::Ja => "言語不明",
        }
    }

    pub fn err_create_config_dir(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("failed to create config directory: {path}"),
            Lang::Ja => format!("設定ディレクトリを作成できませんでした: {path}"),
        }
    }

    pub fn err_serialize_config(&self) -> &'static str {
        match self.lang {
            Lang::En => "failed to serialize config",
            Lang::Ja => "設定をシリアライズできませんでした",
        }
    }

    pub fn err_write_config(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("failed to write config file: {path}"),
            Lang::Ja => format!("設定ファイルを書き込めませんでした: {path}"),
        }
    }

    pub fn err_invalid_language_value(&self, value: &str, valid: &str) -> String {
        match self.lang {
            Lang::En => format!("invalid language value: {value} (valid: {valid})"),
            Lang::Ja => format!("無効な言語の値: {value}（有効な値: {valid}）"),
        }
    }

    pub fn err_empty_value(&self, key: &str) -> String {
        match self.lang {
            Lang::En => format!("value for {key} cannot be empty"),
            Lang::Ja => format!("{key} の値を空にすることはできません"),
        }
    }

    pub fn err_home_dir(&self) -> &'static str {
        match self.lang {
            Lang::En => "failed to determine home directory",
            Lang::Ja => "ホームディレクトリを特定できませんでした",
        }
    }

    pub fn err_current_dir(&self) -> &'static str {
        match self.lang {
            Lang::En => "failed to determine current directory",
            Lang::Ja => "カレントディレクトリを特定できませんでした",
        }
    }

    // File errors
    pub fn err_read_file(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("failed to read file: {path}"),
            Lang::Ja => format!("ファイルを読み込めませんでした: {path}"),
        }
    }

    pub fn err_write_file(&self, path: &str) -> String {
        match self.lang {
            Lang::En => format!("failed to write file: {path}"),
            Lang::Ja => format!("ファイルを書き込めませんでした: {path}"),
        }
    }

    pub fn err_serialize_summary(&self) -> &'static str {
        match self.lang {
            Lang::En => "failed to serialize summary",
            Lang::Ja => "概要をシリアライズできませんでした",
        }
    }

    // Help text
    pub fn help_app_about(&self) -> &'static str {
        match self.lang {
            Lang::En => "Configure AGENTS.md / GEMINI.md: switch template language and set MEMORY_PATH",
            Lang::Ja => "AGENTS.md / GEMINI.md を設定: テンプレートの言語を切り替え、MEMORY_PATH を設定",
        }
    }

    pub fn help_switcher_about(&self) -> &'static str {
        match self.lang {
            Lang::En => "Switch AGENTS.md between English and Japanese, or show the current language",
            Lang::Ja => "AGENTS.md を英語と日本語で切り替え、または現在の言語を表示",
        }
    }

    pub fn help_arg_lang(&self) -> &'static str {
        match self.lang {
            Lang::En => "Template language (en/ja); prompts interactively when omitted",
            Lang::Ja => "テンプレートの言語 (en/ja)。省略時は対話形式で選択",
        }
    }

    pub fn help_arg_target_lang(&self) -> &'static str {
        match self.lang {
            Lang::En => "Language to switch to (en/ja); shows the current language when omitted",
            Lang::Ja => "切り替え先の言語 (en/ja)。省略時は現在の言語を表示",
        }
    }

    pub fn help_arg_dir(&self) -> &'static str {
        match self.lang {
            Lang::En => "Directory containing the templates and AGENTS.md (default: current directory)",
            Lang::Ja => "テンプレートと AGENTS.md を含むディレクトリ（デフォルト: カレントディレクトリ）",
        }
    }

    pub fn help_arg_memory_path(&self) -> &'static str {
        match self.lang {
            Lang::En => "Memory root path (skips the interactive path prompt)",
            Lang::Ja => "メモリルートパス（対話形式のパス入力を省略）",
        }
    }

    pub fn help_arg_yes(&self) -> &'static str {
        match self.lang {
            Lang::En => "Answer yes to every confirmation prompt",
            Lang::Ja => "すべての確認プロンプトに yes と回答",
        }
    }

    pub fn help_arg_json(&self) -> &'static str {
        match self.lang {
            Lang::En => "Print the final summary as JSON",
            Lang::Ja => "最終概要を JSON で出力",
        }
    }

    pub fn help_cmd_config(&self) -> &'static str {
        match self.lang {
            Lang::En => "Manage configuration",
            Lang::Ja => "設定を管理",
        }
    }

    pub fn help_cmd_completions(&self) -> &'static str {
        match self.lang {
            Lang::En => "Generate shell completion scripts",
            Lang::Ja => "シェル補完スクリプトを生成",
        }
    }

    pub fn help_cmd_config_get(&self) -> &'static str {
        match self.lang {
            Lang::En => "Get a configuration value",
            Lang::Ja => "設定値を取得",
        }
    }

    pub fn help_cmd_config_set(&self) -> &'static str {
        match self.lang {
            Lang::En => "Set a configuration value",
            Lang::Ja => "設定値を変更",
        }
    }

    pub fn help_cmd_config_list(&self) -> &'static str {
        match self.lang {
            Lang::En => "List all configuration values",
            Lang::Ja => "すべての設定値を一覧表示",
        }
    }

    pub fn help_cmd_config_reset(&self) -> &'static str {
        match self.lang {
            Lang::En => "Reset configuration to defaults",
            Lang::Ja => "設定をデフォルトに戻す",
        }
    }

    pub fn help_cmd_config_path(&self) -> &'static str {
        match self.lang {
            Lang::En => "Show configuration file path",
            Lang::Ja => "設定ファイルのパスを表示",
        }
    }

    pub fn help_cmd_config_files(&self) -> &'static str {
        match self.lang {
            Lang::En => "Show the configured files resolved against --dir",
            Lang::Ja => "--dir を基準に設定済みファイルを表示",
        }
    }

    pub fn help_arg_config_key(&self) -> &'static str {
        match self.lang {
            Lang::En => "Configuration key (language, template_en, template_ja, primary, wip, mirror)",
            Lang::Ja => "設定キー（language、template_en、template_ja、primary、wip、mirror）",
        }
    }

    pub fn help_arg_config_value(&self) -> &'static str {
        match self.lang {
            Lang::En => "Configuration value",
            Lang::Ja => "設定値",
        }
    }

    pub fn help_arg_shell(&self) -> &'static str {
        match self.lang {
            Lang::En => "Shell to generate completions for",
            Lang::Ja => "補完を生成するシェル",
        }
    }
}

/// Resolve the message language.
///
/// Priority: CLI flag > config > document language > environment > English.
pub fn detect_lang(cli_lang: Option<&str>, config_lang: &str, document: Option<Lang>) -> Lang {
    if let Some(lang) = cli_lang.and_then(Lang::from_code) {
        return lang;
    }

    if config_lang != "auto" {
        if let Some(lang) = Lang::from_tag(config_lang) {
            return lang;
        }
    }

    if let Some(lang) = document {
        return lang;
    }

    parse_env_lang().unwrap_or(Lang::En)
}

fn parse_env_lang() -> Option<Lang> {
    let keys = ["AGENTS_MD_LANG", "LC_ALL", "LC_MESSAGES", "LANGUAGE", "LANG"];
    for k in keys {
        let Some(v) = env::var_os(k) else { continue };
        let mut s = v.to_string_lossy().to_string();
        if k == "LANGUAGE" {
            if let Some((first, _)) = s.split_once(':') {
                s = first.to_string();
            }
        }
        if let Some(lang) = Lang::from_tag(&s) {
            return Some(lang);
        }
    }
    None
}
