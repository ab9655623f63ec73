mod auth_dto;

pub use auth_dto::{
    ForgotPasswordRequestDto, LoginRequestDto, LoginResponseDto, PasswordReset, ProfileUpdate,
    RegisterRequestDto, Registration, UpdateProfileRequestDto, UserResponseDto,
};
