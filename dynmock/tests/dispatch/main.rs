mod call_base;
mod events;
mod matching;
mod out_params;
