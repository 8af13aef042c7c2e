use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bundlekit completions --shell bash > ~/.bash_completion.d/bundlekit\n\n\
                  Generate zsh completions:\n    bundlekit completions --shell zsh > ~/.zfunc/_bundlekit\n\n\
                  Generate fish completions:\n    bundlekit completions --shell fish > ~/.config/fish/completions/bundlekit.fish\n\n\
                  Generate PowerShell completions:\n    bundlekit completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
